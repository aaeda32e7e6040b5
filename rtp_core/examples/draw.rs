use rtp_core::{simulate, PayoutParams, SeededSource, StatefulGenerator, StatelessGenerator};

fn main() {
    // Compare both generators on the same seed
    let params = PayoutParams::new(0.96).with_payouts(0.0, 100.0);

    let stateless = StatelessGenerator::new(params, SeededSource::new("example-seed"))
        .expect("valid params");
    let stateful = StatefulGenerator::new(params, SeededSource::new("example-seed"))
        .expect("valid params");

    for draws in [1_000u64, 100_000] {
        let a = simulate(&stateless, draws);
        let b = simulate(&stateful, draws);
        println!(
            "draws={} stateless_rtp={:.4} stateful_rtp={:.4} balance={:.2}",
            draws,
            a.realized_rtp,
            b.realized_rtp,
            stateful.balance()
        );
    }
}
