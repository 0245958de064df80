use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Figures shown to the user after a successful calculation.
///
/// Both amounts carry two fractional digits. `total` follows the
/// [`TotalFigure`](crate::TotalFigure) the calculator was configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanResult {
    /// Level monthly payment.
    pub installment: Decimal,
    /// Term-level figure shown next to the installment.
    pub total: Decimal,
}

impl LoanResult {
    /// `0.00` with an explicit scale of two so it displays as such.
    pub const ZERO: Decimal = Decimal::from_parts(0, 0, 0, false, 2);

    pub fn new(
        installment: Decimal,
        total: Decimal,
    ) -> Self {
        Self { installment, total }
    }

    pub fn is_zero(&self) -> bool {
        self.installment.is_zero() && self.total.is_zero()
    }
}

impl Default for LoanResult {
    fn default() -> Self {
        Self {
            installment: Self::ZERO,
            total: Self::ZERO,
        }
    }
}
