use crate::generator::PayoutGenerator;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationSummary {
    pub draws: u64,
    pub total_payout: f64,
    pub high_payouts: u64,
    pub realized_rtp: f64,
}

/// Runs `draws` consecutive draws and aggregates the outcome.
pub fn simulate(generator: &dyn PayoutGenerator, draws: u64) -> SimulationSummary {
    let high = generator.params().high_payout;
    let mut total_payout = 0.0;
    let mut high_payouts = 0u64;
    for _ in 0..draws {
        let m = generator.next();
        total_payout += m;
        if m == high {
            high_payouts += 1;
        }
    }
    let realized_rtp = if draws == 0 {
        0.0
    } else {
        total_payout / draws as f64
    };
    SimulationSummary {
        draws,
        total_payout,
        high_payouts,
        realized_rtp,
    }
}
