//! The cell engine: the single entry point for reading, writing and
//! recomputing the worksheet.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::recompute;
use crate::cells::layout::{
    self, ACCOUNTING_PROFIT, ADMITTED_TAX, ALTERNATE_TAX, CellKind, DOMESTIC_SALES,
    DONATION_CREDIT, EXPORT_RATIO, EXPORT_SALES, FINAL_TAX, GROSS_REVENUE, MINIMUM_TAX,
    NET_TAX_LIABILITY, NORMAL_TAX, OTHER_CREDITS, REFUNDABLE_TAX, REGISTRATION_FLAG,
    STARTUP_FLAG, TAX_CHARGEABLE, TAX_PAID, TAXABLE_INCOME, TOTAL_CREDITS,
};
use crate::cells::{CellId, CellStore};
use crate::fixture;
use crate::models::{CellValue, TaxRates, TaxRatesError, TaxResults, YesNo};
use crate::utils::parse_amount;

/// Corporate income tax worksheet with eager recomputation.
///
/// Every mutating call leaves the engine consistent: derived cells always
/// reflect the current inputs when control returns to the caller.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::{CellValue, TaxEngine};
///
/// let mut engine = TaxEngine::new();
/// engine.set_value("C4", "1,000,000");
/// engine.set_value("C5", "250000");
///
/// assert_eq!(engine.get_value("C3"), CellValue::Number(dec!(1250000)));
/// assert_eq!(engine.get_value("D7"), CellValue::Number(dec!(0.2)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxEngine {
    store: CellStore,
    rates: TaxRates,
}

impl TaxEngine {
    /// An engine with every input at its default and the default rates.
    pub fn new() -> Self {
        let mut engine = Self {
            store: CellStore::new(),
            rates: TaxRates::default(),
        };
        engine.calculate_all();
        engine
    }

    /// An engine with custom rates.
    ///
    /// # Errors
    ///
    /// Returns the [`TaxRatesError`] of the first rate out of range.
    pub fn with_rates(rates: TaxRates) -> Result<Self, TaxRatesError> {
        rates.validate()?;
        let mut engine = Self {
            store: CellStore::new(),
            rates,
        };
        engine.calculate_all();
        Ok(engine)
    }

    pub fn rates(&self) -> &TaxRates {
        &self.rates
    }

    // ─── reads ───────────────────────────────────────────────────────────────

    /// Value of the cell named by `cell`, e.g. `"E126"`.
    ///
    /// Unknown coordinates read as zero.
    pub fn get_value(
        &self,
        cell: &str,
    ) -> CellValue {
        match cell.parse::<CellId>() {
            Ok(cell) => self.store.value(cell),
            Err(e) => {
                debug!(cell, "read of unknown cell: {}", e);
                CellValue::default()
            }
        }
    }

    pub fn value(
        &self,
        cell: CellId,
    ) -> CellValue {
        self.store.value(cell)
    }

    pub fn amount(
        &self,
        cell: CellId,
    ) -> Decimal {
        self.store.amount(cell)
    }

    // ─── writes ──────────────────────────────────────────────────────────────

    /// Writes a raw entry into a cell and recomputes.
    ///
    /// Amounts are parsed leniently (see [`parse_amount`]); the two flag cells
    /// take `Yes`/`No` in any letter case, and any other token leaves the flag
    /// unchanged. Writes to unknown coordinates are ignored. Writes to derived
    /// cells are accepted but overwritten by the recomputation.
    pub fn set_value(
        &mut self,
        cell: &str,
        raw: &str,
    ) {
        let cell = match cell.parse::<CellId>() {
            Ok(cell) => cell,
            Err(e) => {
                warn!(cell, "write to unknown cell ignored: {}", e);
                return;
            }
        };

        if cell == REGISTRATION_FLAG || cell == STARTUP_FLAG {
            match YesNo::parse(raw) {
                Some(flag) => self.write_flag(cell, flag),
                None => warn!(%cell, raw, "flag expects Yes or No; value unchanged"),
            }
        } else {
            self.write_amount(cell, parse_amount(raw));
        }

        self.calculate_all();
    }

    /// Writes an amount into a cell and recomputes.
    pub fn set_amount(
        &mut self,
        cell: CellId,
        value: Decimal,
    ) {
        self.write_amount(cell, value);
        self.calculate_all();
    }

    /// Sets the export registration flag (D6) and recomputes.
    pub fn set_registered(
        &mut self,
        flag: YesNo,
    ) {
        self.write_flag(REGISTRATION_FLAG, flag);
        self.calculate_all();
    }

    /// Sets the startup relief flag (C142) and recomputes.
    pub fn set_startup(
        &mut self,
        flag: YesNo,
    ) {
        self.write_flag(STARTUP_FLAG, flag);
        self.calculate_all();
    }

    /// Applies a batch of typed writes, then recomputes once.
    ///
    /// Flags written to amount cells, and amounts written to flag cells, are
    /// skipped with a warning.
    pub fn set_inputs<I>(
        &mut self,
        inputs: I,
    ) where
        I: IntoIterator<Item = (CellId, CellValue)>,
    {
        for (cell, value) in inputs {
            let is_flag_cell = cell == REGISTRATION_FLAG || cell == STARTUP_FLAG;
            match value {
                CellValue::Flag(flag) if is_flag_cell => self.write_flag(cell, flag),
                CellValue::Number(amount) if !is_flag_cell => self.write_amount(cell, amount),
                other => warn!(%cell, value = %other, "value does not fit cell; skipped"),
            }
        }
        self.calculate_all();
    }

    fn write_amount(
        &mut self,
        cell: CellId,
        value: Decimal,
    ) {
        if layout::kind(cell) == CellKind::Derived {
            debug!(%cell, %value, "write to derived cell will be replaced on recompute");
        } else {
            debug!(%cell, %value, "cell write");
        }
        self.store.set_amount(cell, value);
    }

    fn write_flag(
        &mut self,
        cell: CellId,
        flag: YesNo,
    ) {
        debug!(%cell, %flag, "flag write");
        if cell == REGISTRATION_FLAG {
            self.store.set_registered(flag);
        } else if cell == STARTUP_FLAG {
            self.store.set_startup(flag);
        }
    }

    // ─── whole-worksheet operations ──────────────────────────────────────────

    /// Recomputes every derived cell from the current inputs.
    pub fn calculate_all(&mut self) {
        debug!("recomputing all derived cells");
        recompute(&mut self.store, &self.rates);
    }

    /// Replaces all inputs with the worked example and recomputes.
    pub fn load_test_data(&mut self) {
        debug!("loading worked example");
        self.store = CellStore::new();
        self.set_inputs(fixture::test_data());
    }

    /// Restores every input to its default and recomputes. Rates are kept.
    pub fn reset_all(&mut self) {
        debug!("resetting all inputs");
        self.store = CellStore::new();
        self.calculate_all();
    }

    /// Headline figures of the current state.
    pub fn get_tax_results(&self) -> TaxResults {
        let store = &self.store;
        TaxResults {
            taxable_income: store.amount(CellId::taxable(TAXABLE_INCOME)),
            normal_tax: store.amount(NORMAL_TAX),
            final_tax: store.amount(FINAL_TAX),
            alternate_tax: store.amount(ALTERNATE_TAX),
            minimum_tax: store.amount(MINIMUM_TAX),
            tax_chargeable: store.amount(TAX_CHARGEABLE),
            donation_credit: store.amount(DONATION_CREDIT),
            other_credits: store.amount(OTHER_CREDITS),
            total_credits: store.amount(TOTAL_CREDITS),
            net_tax_liability: store.amount(NET_TAX_LIABILITY),
            tax_paid: store.amount(TAX_PAID),
            admitted_tax: store.amount(ADMITTED_TAX),
            refundable_tax: store.amount(REFUNDABLE_TAX),
            export_ratio: store.amount(CellId::exempt(EXPORT_RATIO)),
            registered: store.registered(),
            startup: store.startup(),
            accounting_profit: store.amount(CellId::total(ACCOUNTING_PROFIT)),
            domestic_sales: store.amount(CellId::total(DOMESTIC_SALES)),
            export_sales: store.amount(CellId::total(EXPORT_SALES)),
            gross_revenue: store.amount(CellId::total(GROSS_REVENUE)),
        }
    }
}

impl Default for TaxEngine {
    fn default() -> Self {
        Self::new()
    }
}
