use crate::domain::model::PricingInput;
use crate::domain::ports::PriceCalculator;
use crate::utils::error::{BundlesError, Result};
use async_trait::async_trait;
use std::sync::Arc;

pub const DEFAULT_HEAVY_WORK_ITERATIONS: u64 = 50_000_000;

/// Discount that actually applies: bundles start at two products.
pub fn effective_discount(selected_count: usize, configured_percent: f64) -> f64 {
    if selected_count > 1 {
        configured_percent
    } else {
        0.0
    }
}

pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Burns CPU for `iterations` rounds. Only used to show blocking vs non-blocking dispatch.
pub fn simulate_heavy_work(iterations: u64) -> f64 {
    let mut acc = 0.0_f64;
    for i in 0..iterations {
        acc += std::hint::black_box((i as f64).sqrt());
    }
    acc
}

/// The pricing computation shared by every strategy.
pub fn calculate_total(input: &PricingInput) -> Result<f64> {
    if let Some(iterations) = input.heavy_work {
        std::hint::black_box(simulate_heavy_work(iterations));
    }

    let subtotal = input.subtotal();
    let discount_amount = subtotal * (input.discount_percent / 100.0);
    let total = round_to_cents(subtotal - discount_amount);

    if !total.is_finite() {
        return Err(BundlesError::WorkerError {
            message: format!("non-finite total computed from {} prices", input.prices.len()),
        });
    }
    Ok(total)
}

/// Runs the computation on the calling task.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineCalculator;

#[async_trait]
impl PriceCalculator for InlineCalculator {
    async fn compute(&self, input: PricingInput) -> Result<f64> {
        calculate_total(&input)
    }

    fn name(&self) -> &'static str {
        "main-thread"
    }
}

/// Moves the inputs onto tokio's blocking pool so the caller's task stays responsive.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkerCalculator;

#[async_trait]
impl PriceCalculator for WorkerCalculator {
    async fn compute(&self, input: PricingInput) -> Result<f64> {
        let handle = tokio::task::spawn_blocking(move || calculate_total(&input));
        match handle.await {
            Ok(result) => result,
            Err(e) => Err(BundlesError::WorkerError {
                message: e.to_string(),
            }),
        }
    }

    fn name(&self) -> &'static str {
        "worker"
    }
}

pub fn calculator_for(use_worker: bool) -> Arc<dyn PriceCalculator> {
    if use_worker {
        Arc::new(WorkerCalculator)
    } else {
        Arc::new(InlineCalculator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(prices: &[f64], discount_percent: f64) -> PricingInput {
        PricingInput {
            prices: prices.to_vec(),
            discount_percent,
            heavy_work: None,
        }
    }

    #[test]
    fn test_effective_discount_needs_two_products() {
        assert_eq!(effective_discount(0, 10.0), 0.0);
        assert_eq!(effective_discount(1, 10.0), 0.0);
        assert_eq!(effective_discount(2, 10.0), 10.0);
        assert_eq!(effective_discount(5, 25.0), 25.0);
    }

    #[test]
    fn test_calculate_total_applies_discount_and_rounds() {
        assert_eq!(calculate_total(&input(&[10.0, 20.0], 10.0)).unwrap(), 27.0);
        assert_eq!(calculate_total(&input(&[8.99, 6.99], 15.0)).unwrap(), 13.58);
        assert_eq!(calculate_total(&input(&[20.0], 0.0)).unwrap(), 20.0);
        assert_eq!(calculate_total(&input(&[19.99, 0.01], 100.0)).unwrap(), 0.0);
    }

    #[test]
    fn test_calculate_total_rejects_non_finite() {
        assert!(calculate_total(&input(&[f64::INFINITY], 0.0)).is_err());
    }

    #[test]
    fn test_heavy_work_does_not_change_total() {
        let mut heavy = input(&[8.99, 6.99, 12.49], 20.0);
        heavy.heavy_work = Some(10_000);
        let light = input(&[8.99, 6.99, 12.49], 20.0);
        assert_eq!(calculate_total(&heavy).unwrap(), calculate_total(&light).unwrap());
    }

    #[tokio::test]
    async fn test_inline_and_worker_agree() {
        let cases = [
            (vec![10.0, 20.0], 10.0),
            (vec![8.99, 6.99, 4.49, 12.0], 15.0),
            (vec![0.1, 0.2], 33.0),
            (vec![99.99], 0.0),
        ];

        for (prices, discount) in cases {
            let inline = InlineCalculator.compute(input(&prices, discount)).await.unwrap();
            let worker = WorkerCalculator.compute(input(&prices, discount)).await.unwrap();
            assert_eq!(inline, worker, "prices {:?} at {}%", prices, discount);
        }
    }

    #[test]
    fn test_inline_calculator_completes_without_runtime() {
        let total = tokio_test::block_on(InlineCalculator.compute(input(&[5.0, 5.0], 50.0))).unwrap();
        assert_eq!(total, 5.0);
    }

    #[test]
    fn test_calculator_for_picks_strategy() {
        assert_eq!(calculator_for(true).name(), "worker");
        assert_eq!(calculator_for(false).name(), "main-thread");
    }
}
