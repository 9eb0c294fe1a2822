// 🧭 Health Metrics - normalized 0-100 bars for the cockpit radar
//
// These are presentation heuristics, not accounting ratios. Formulas, with
// ti = income (or 1), te = expense (or 1), bal = account balance:
//
//   profit_margin = max(0, (ti - te) / ti * 100) * profit_margin_scale
//   liquidity     = bal / te * liquidity_scale
//   fixed_costs   = 100 - te / ti * fixed_cost_scale
//   inbound_flow  = ti / inbound_reference * 100
//   burn_rate     = 100 - te / (bal or 1) * 100
//   cash_health   = bal / cash_reference * 100
//
// Every value is clamped into [0, 100].

use crate::breakdown::CategorySlice;
use crate::config::MetricReferences;
use crate::summary::FinancialSummary;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthMetrics {
    pub profit_margin: f64,
    pub retention: f64,
    pub roi: f64,
    pub liquidity: f64,
    pub tax_efficiency: f64,
    pub growth_mom: f64,
    pub fixed_costs: f64,
    pub inbound_flow: f64,
    pub burn_rate: f64,
    pub investment: f64,
    pub cash_health: f64,
    /// Share of the largest expense category (0 when there is none)
    pub top_category_share: f64,
}

impl HealthMetrics {
    /// Radar axes in display order
    pub fn axes(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("Margem de Lucro", self.profit_margin),
            ("Retenção", self.retention),
            ("ROI", self.roi),
            ("Liquidez", self.liquidity),
            ("Eficiência Fiscal", self.tax_efficiency),
            ("Crescimento MoM", self.growth_mom),
            ("Custos Fixos", self.fixed_costs),
            ("Fluxo de Entrada", self.inbound_flow),
            ("Queima de Caixa", self.burn_rate),
            ("Investimento", self.investment),
            ("Saúde do Caixa", self.cash_health),
        ]
    }
}

/// Clamp into [0, 100]; NaN collapses to 0
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

fn or_one(value: f64) -> f64 {
    if value == 0.0 {
        1.0
    } else {
        value
    }
}

pub fn health_metrics(
    summary: &FinancialSummary,
    categories: &[CategorySlice],
    refs: &MetricReferences,
) -> HealthMetrics {
    let ti = or_one(summary.income);
    let te = or_one(summary.expense);
    let balance = summary.balance;

    let margin = (((ti - te) / ti) * 100.0).max(0.0);

    HealthMetrics {
        profit_margin: clamp_score(margin * refs.profit_margin_scale),
        retention: clamp_score(refs.retention),
        roi: clamp_score(refs.roi),
        liquidity: clamp_score((balance / te) * refs.liquidity_scale),
        tax_efficiency: clamp_score(refs.tax_efficiency),
        growth_mom: clamp_score(refs.growth_mom),
        fixed_costs: clamp_score(100.0 - (te / ti) * refs.fixed_cost_scale),
        inbound_flow: clamp_score((ti / refs.inbound_reference) * 100.0),
        burn_rate: clamp_score(100.0 - (te / or_one(balance)) * 100.0),
        investment: clamp_score(refs.investment),
        cash_health: clamp_score((balance / refs.cash_reference) * 100.0),
        top_category_share: categories
            .iter()
            .map(|c| c.percentage as f64)
            .fold(0.0, f64::max),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(income: f64, expense: f64, balance: f64) -> FinancialSummary {
        FinancialSummary { income, expense, balance }
    }

    #[test]
    fn test_reference_values() {
        let refs = MetricReferences::default();
        let m = health_metrics(&summary(10_000.0, 4_000.0, 5_000.0), &[], &refs);

        // margin 60% * 1.5 = 90
        assert!((m.profit_margin - 90.0).abs() < 1e-9);
        // 5000 / 4000 * 20 = 25
        assert!((m.liquidity - 25.0).abs() < 1e-9);
        // 100 - 0.4 * 50 = 80
        assert!((m.fixed_costs - 80.0).abs() < 1e-9);
        // 10000 / 20000 = 50%
        assert!((m.inbound_flow - 50.0).abs() < 1e-9);
        // 100 - 4000/5000*100 = 20
        assert!((m.burn_rate - 20.0).abs() < 1e-9);
        // 5000 / 10000 = 50%
        assert!((m.cash_health - 50.0).abs() < 1e-9);
        assert_eq!(m.retention, 85.0);
        assert_eq!(m.top_category_share, 0.0);
    }

    #[test]
    fn test_zero_inputs_do_not_produce_nan() {
        let refs = MetricReferences::default();
        let m = health_metrics(&summary(0.0, 0.0, 0.0), &[], &refs);

        for (name, value) in m.axes() {
            assert!(value.is_finite(), "{} should be finite", name);
            assert!((0.0..=100.0).contains(&value), "{} out of range: {}", name, value);
        }
        // 1 - 1 / 1 → 0 margin, burn 100 - 1/1*100 = 0
        assert_eq!(m.profit_margin, 0.0);
        assert_eq!(m.burn_rate, 0.0);
    }

    #[test]
    fn test_extremes_are_clamped() {
        let refs = MetricReferences::default();

        let rich = health_metrics(&summary(1_000_000.0, 1.0, 10_000_000.0), &[], &refs);
        assert_eq!(rich.profit_margin, 100.0);
        assert_eq!(rich.liquidity, 100.0);
        assert_eq!(rich.inbound_flow, 100.0);
        assert_eq!(rich.cash_health, 100.0);

        let broke = health_metrics(&summary(100.0, 50_000.0, -2_000.0), &[], &refs);
        assert_eq!(broke.profit_margin, 0.0);
        assert_eq!(broke.liquidity, 0.0);
        assert_eq!(broke.fixed_costs, 0.0);
        assert_eq!(broke.cash_health, 0.0);
    }

    #[test]
    fn test_top_category_share() {
        let refs = MetricReferences::default();
        let slices = vec![
            CategorySlice { id: "a".into(), name: "A".into(), amount: 70.0, percentage: 70 },
            CategorySlice { id: "b".into(), name: "B".into(), amount: 30.0, percentage: 30 },
        ];

        let m = health_metrics(&summary(1.0, 1.0, 1.0), &slices, &refs);
        assert_eq!(m.top_category_share, 70.0);
    }

    #[test]
    fn test_clamp_score() {
        assert_eq!(clamp_score(f64::NAN), 0.0);
        assert_eq!(clamp_score(f64::INFINITY), 100.0);
        assert_eq!(clamp_score(-3.0), 0.0);
        assert_eq!(clamp_score(42.5), 42.5);
    }
}
