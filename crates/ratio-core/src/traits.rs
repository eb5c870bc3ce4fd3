use async_trait::async_trait;

use crate::{RatioError, RawFinancials};

/// Something that can hand over a raw financials payload for a symbol.
///
/// `Ok(None)` means the provider answered with no data for the symbol; callers
/// should report that instead of running the ratio pipeline.
#[async_trait]
pub trait FinancialsSource: Send + Sync {
    async fn fetch_financials(
        &self,
        symbol: &str,
        region: &str,
    ) -> Result<Option<RawFinancials>, RatioError>;
}
