use popcorn_models::Conversion;
use popcorn_sources::{RateSource, SourceError};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// Zero amount or identical currencies; nothing is sent upstream
    #[error("Choose currencies and enter the amount")]
    NothingToConvert,
    #[error(transparent)]
    Source(#[from] SourceError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    amount: f64,
    from: String,
    to: String,
}

impl ConversionRequest {
    pub fn new(amount: f64, from: &str, to: &str) -> Result<Self, ConversionError> {
        let from = from.trim().to_uppercase();
        let to = to.trim().to_uppercase();

        if !amount.is_finite() || amount <= 0.0 || from.is_empty() || to.is_empty() || from == to {
            return Err(ConversionError::NothingToConvert);
        }

        Ok(Self { amount, from, to })
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }
}

pub async fn convert<R>(source: &R, request: &ConversionRequest) -> Result<Conversion, ConversionError>
where
    R: RateSource + ?Sized,
{
    debug!(source = source.source_name(), from = %request.from, to = %request.to, "Converting currency");
    let result = source.convert(request.amount, &request.from, &request.to).await?;

    Ok(Conversion {
        amount: request.amount,
        from: request.from.clone(),
        to: request.to.clone(),
        result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedRate(f64);

    #[async_trait]
    impl RateSource for FixedRate {
        fn source_name(&self) -> &str {
            "fixed"
        }

        async fn convert(&self, amount: f64, _from: &str, _to: &str) -> Result<f64, SourceError> {
            Ok(amount * self.0)
        }
    }

    #[test]
    fn test_request_validation() {
        assert_eq!(ConversionRequest::new(0.0, "USD", "EUR"), Err(ConversionError::NothingToConvert));
        assert_eq!(ConversionRequest::new(10.0, "usd", "USD"), Err(ConversionError::NothingToConvert));
        assert_eq!(ConversionRequest::new(f64::NAN, "USD", "EUR"), Err(ConversionError::NothingToConvert));

        let request = ConversionRequest::new(10.0, "usd", " eur ").unwrap();
        assert_eq!(request.from(), "USD");
        assert_eq!(request.to(), "EUR");
    }

    #[tokio::test]
    async fn test_convert_uses_source() {
        let request = ConversionRequest::new(100.0, "EUR", "USD").unwrap();
        let conversion = convert(&FixedRate(1.5), &request).await.unwrap();
        assert_eq!(conversion.result, 150.0);
        assert_eq!(conversion.to, "USD");
    }
}
