//! Rough per-request cost estimate for the supported chat models.

use super::ChatMessage;
use crate::utils::error::{Error, Result};
use serde::Serialize;

/// Approximate characters per token.
const CHARS_PER_TOKEN: f64 = 4.0;

/// EUR price per token, input then output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPricing {
    pub input: f64,
    pub output: f64,
}

pub fn pricing_for(model: &str) -> Option<ModelPricing> {
    match model {
        | "gpt-4-turbo-preview" => Some(ModelPricing { input: 0.000_01, output: 0.000_03 }),
        | "gpt-4" => Some(ModelPricing { input: 0.000_03, output: 0.000_06 }),
        | "gpt-3.5-turbo" => Some(ModelPricing { input: 0.000_001, output: 0.000_002 }),
        | _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostEstimate {
    /// Total in EUR
    pub total_cost: f64,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub model: String,
}

/// Estimate the cost of sending `messages` and receiving `output_chars`
/// characters back. Costs use the fractional token counts; the reported
/// counts are rounded up.
pub fn estimate_cost(model: &str, messages: &[ChatMessage], output_chars: usize) -> Result<CostEstimate> {
    let pricing = pricing_for(model)
        .ok_or_else(|| Error::InvalidArgument(format!("no pricing known for model '{}'", model)))?;

    let input_chars: usize = messages.iter().map(|m| m.content.chars().count()).sum();
    let input_tokens = input_chars as f64 / CHARS_PER_TOKEN;
    let output_tokens = output_chars as f64 / CHARS_PER_TOKEN;

    Ok(CostEstimate {
        total_cost: input_tokens * pricing.input + output_tokens * pricing.output,
        input_tokens: input_tokens.ceil() as u64,
        output_tokens: output_tokens.ceil() as u64,
        model: model.to_string(),
    })
}
