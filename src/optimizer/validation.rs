use crate::error::InvalidInputError;
use crate::models::Candle;

pub fn validate_balance(initial_balance: f64) -> Result<(), InvalidInputError> {
    if initial_balance.is_finite() && initial_balance > 0.0 {
        Ok(())
    } else {
        Err(InvalidInputError::NonPositiveBalance(initial_balance))
    }
}

/// Every close must be finite and strictly positive; a zero close would divide by zero.
pub fn validate_closes(candles: &[Candle]) -> Result<(), InvalidInputError> {
    match candles
        .iter()
        .enumerate()
        .find(|(_, c)| !(c.close.is_finite() && c.close > 0.0))
    {
        Some((index, candle)) => Err(InvalidInputError::InvalidClose {
            index,
            value: candle.close,
        }),
        None => Ok(()),
    }
}
