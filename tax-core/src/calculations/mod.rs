//! Derivation steps of the corporate return worksheet.
//!
//! Each step reads cells written by earlier steps and overwrites its own
//! derived cells. [`recompute`] runs them all in the order of [`STEPS`],
//! which mirrors the top-to-bottom flow of the return: revenue, profit,
//! tax adjustments, taxable income, tax, credits, payments.

pub mod common;
mod income;
mod lines;
mod profit;
mod revenue;
pub mod tax;

use tracing::trace;

use crate::cells::CellStore;
use crate::models::TaxRates;

/// A named derivation step.
#[derive(Clone, Copy)]
pub struct Step {
    pub name: &'static str,
    pub run: fn(&mut CellStore, &TaxRates),
}

impl std::fmt::Debug for Step {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("Step").field("name", &self.name).finish()
    }
}

/// Every derivation step, in dependency order.
pub const STEPS: [Step; 15] = [
    Step {
        name: "export_ratio",
        run: revenue::derive_export_ratio,
    },
    Step {
        name: "gross_revenue",
        run: revenue::derive_gross_revenue,
    },
    Step {
        name: "selling_expenses",
        run: revenue::derive_selling_expenses,
    },
    Step {
        name: "cost_of_sales",
        run: profit::derive_cost_of_sales,
    },
    Step {
        name: "management_expenses",
        run: profit::derive_management_expenses,
    },
    Step {
        name: "other_revenues",
        run: profit::derive_other_revenues,
    },
    Step {
        name: "accounting_profit",
        run: profit::derive_accounting_profit,
    },
    Step {
        name: "inadmissible_deductions",
        run: income::derive_inadmissible_deductions,
    },
    Step {
        name: "admissible_deductions",
        run: income::derive_admissible_deductions,
    },
    Step {
        name: "tax_depreciation",
        run: income::derive_tax_depreciation,
    },
    Step {
        name: "total_income",
        run: income::derive_total_income,
    },
    Step {
        name: "taxable_income",
        run: income::derive_taxable_income,
    },
    Step {
        name: "tax_chargeable",
        run: tax::derive_tax_chargeable,
    },
    Step {
        name: "tax_credits",
        run: tax::derive_tax_credits,
    },
    Step {
        name: "tax_payments",
        run: tax::derive_tax_payments,
    },
];

/// Overwrites every derived cell from the current inputs.
///
/// Inputs are never modified, so running this twice in a row leaves the
/// store unchanged.
pub fn recompute(
    store: &mut CellStore,
    rates: &TaxRates,
) {
    for step in &STEPS {
        trace!(step = step.name, "running derivation step");
        (step.run)(store, rates);
    }
}
