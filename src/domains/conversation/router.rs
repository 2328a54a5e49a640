//! Conversation router - picks a tool for a question and phrases the answer.

use tracing::{info, instrument, warn};

use super::format::{FALLBACK_REPLY, format_math_reply, format_weather_reply};
use super::intent::{Intent, MathQuestion, WeatherQuestion, detect_intent};
use super::schema::{ConversationRequest, ConversationResponse, ToolCallSummary};
use super::ConversationError;
use crate::domains::client::{MathClient, ToolInvocationError, WeatherClient};
use crate::domains::tools::definitions::CurrentWeatherTool;

/// Routes conversation turns to the math or weather toolkit.
#[derive(Debug, Clone)]
pub struct ConversationRouter {
    math: MathClient,
    weather: WeatherClient,
}

impl ConversationRouter {
    pub fn new(math: MathClient, weather: WeatherClient) -> Self {
        Self { math, weather }
    }

    /// Answer one conversation turn.
    ///
    /// Tool failures of any kind collapse into
    /// [`ConversationError::UpstreamFailure`]; the kind is logged, and no
    /// retry is attempted.
    #[instrument(skip_all, fields(interaction_id = %request.interaction_id))]
    pub async fn respond(
        &self,
        request: ConversationRequest,
    ) -> Result<ConversationResponse, ConversationError> {
        request.validate()?;

        let (reply, tool) = match detect_intent(&request.question) {
            Intent::Math(question) => {
                let (reply, summary) = self.answer_math(&question).await.map_err(upstream)?;
                (reply, Some(summary))
            }
            Intent::Weather(question) => {
                let (reply, summary) = self.answer_weather(&question).await.map_err(upstream)?;
                (reply, Some(summary))
            }
            Intent::NoIntentMatched => {
                info!("No tool matched the question");
                (FALLBACK_REPLY.to_string(), None)
            }
        };

        Ok(ConversationResponse {
            interaction_id: request.interaction_id,
            question: request.question,
            reply,
            tool,
        })
    }

    async fn answer_math(
        &self,
        question: &MathQuestion,
    ) -> Result<(String, ToolCallSummary), ToolInvocationError> {
        let operation = question.operation.as_str();
        info!("Routing to math tool: {} {} {}", question.a, operation, question.b);

        let response = self.math.calculate(operation, question.a, question.b).await?;
        let reply = format_math_reply(&response);
        Ok((
            reply,
            ToolCallSummary::from_response(format!("math.{operation}"), response),
        ))
    }

    async fn answer_weather(
        &self,
        question: &WeatherQuestion,
    ) -> Result<(String, ToolCallSummary), ToolInvocationError> {
        info!("Routing to weather tool: {} ({})", question.location, question.unit);

        let response = self
            .weather
            .current_weather(&question.location, question.unit)
            .await?;
        let reply = format_weather_reply(&response);
        Ok((
            reply,
            ToolCallSummary::from_response(
                format!("weather.{}", CurrentWeatherTool::NAME),
                response,
            ),
        ))
    }
}

fn upstream(err: ToolInvocationError) -> ConversationError {
    warn!(kind = %err.kind(), "Upstream tool failure: {}", err);
    err.into()
}
