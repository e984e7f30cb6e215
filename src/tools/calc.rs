//! Four-function calculator.

use crate::error::Result;

use super::executor::ToolContext;
use super::instruction::Instruction;

pub fn accepts(instruction: &Instruction<'_>) -> bool {
    instruction.args.len() >= 3
}

/// Evaluates `x op y`. Unsupported operators, division by zero and non-finite
/// results give `None`.
#[must_use]
pub fn evaluate(x: f64, op: &str, y: f64) -> Option<f64> {
    let answer = match op {
        "+" => x + y,
        "-" => x - y,
        "*" => x * y,
        "/" if y != 0.0 => x / y,
        _ => return None,
    };
    answer.is_finite().then_some(answer)
}

fn render_operand(raw: &str) -> String {
    raw.parse::<f64>()
        .map_or_else(|_| raw.to_string(), |value| value.to_string())
}

/// Renders the calculation as `x op y=answer`, with `null` for a missing answer.
pub fn render(instruction: &Instruction<'_>) -> String {
    let (Some(x), Some(op), Some(y)) = (
        instruction.args.first(),
        instruction.args.get(1),
        instruction.args.get(2),
    ) else {
        return instruction.first_line().to_string();
    };

    let answer = match (x.parse::<f64>(), y.parse::<f64>()) {
        (Ok(x), Ok(y)) => evaluate(x, op, y),
        _ => None,
    };
    let answer = answer.map_or_else(|| "null".to_string(), |value| value.to_string());

    format!("{}{op}{}={answer}", render_operand(x), render_operand(y))
}

pub async fn run(instruction: &Instruction<'_>, ctx: &ToolContext<'_>) -> Result<String> {
    let text = render(instruction);
    ctx.messenger
        .send_message(&text, ctx.channel, ctx.thread_ts)
        .await?;
    Ok(text)
}
