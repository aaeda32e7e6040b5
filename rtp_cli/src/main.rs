use std::sync::Arc;

use chrono::Utc;
use clap::{Args, Parser, Subcommand};

use rtp_core::{
    build_generator, simulate, GeneratorMode, PayoutParams, SeededSource, StatefulGenerator,
};
use rtp_shared::{DrawRecord, Mode, ParamsReport, SimulationReport};

#[derive(Parser)]
#[command(
    name = "rtp-cli",
    about = "Offline tooling for the RTP payout generator",
    allow_negative_numbers = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the derived probabilities for a parameter set
    Params(ParamArgs),
    /// Run a seeded simulation and print the realized RTP
    Simulate {
        #[command(flatten)]
        params: ParamArgs,
        #[arg(long, value_enum, default_value_t = Mode::Stateful)]
        mode: Mode,
        #[arg(long, default_value_t = 1_000_000)]
        draws: u64,
        #[arg(long, default_value = "rtp")]
        seed: String,
    },
    /// Export a stateful draw trace to CSV path
    ExportCsv {
        path: String,
        #[command(flatten)]
        params: ParamArgs,
        #[arg(long, default_value_t = 10_000)]
        draws: u64,
        #[arg(long, default_value = "rtp")]
        seed: String,
    },
}

#[derive(Args)]
struct ParamArgs {
    /// Target RTP in (0, 1]
    #[arg(long, env = "RTP_TARGET")]
    rtp: f64,
    #[arg(long, default_value_t = PayoutParams::DEFAULT_LOW)]
    low: f64,
    #[arg(long, default_value_t = PayoutParams::DEFAULT_HIGH)]
    high: f64,
    #[arg(long, default_value_t = PayoutParams::DEFAULT_SENSITIVITY)]
    sensitivity: f64,
}

impl ParamArgs {
    fn validated(&self) -> anyhow::Result<PayoutParams> {
        let params = PayoutParams::new(self.rtp)
            .with_payouts(self.low, self.high)
            .with_sensitivity(self.sensitivity);
        params.validate()?;
        if params.is_probability_clamped() {
            eprintln!(
                "warning: derived win probability {} is outside [0, 1] and will be clamped",
                params.raw_win_probability()
            );
        }
        Ok(params)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Params(args) => {
            let p = args.validated()?;
            let report = ParamsReport {
                target_rtp: p.target_rtp,
                low_payout: p.low_payout,
                high_payout: p.high_payout,
                sensitivity: p.sensitivity,
                raw_win_probability: p.raw_win_probability(),
                win_probability: p.win_probability(),
                probability_clamped: p.is_probability_clamped(),
                max_balance: p.max_balance(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Simulate {
            params,
            mode,
            draws,
            seed,
        } => {
            let params = params.validated()?;
            let source = Arc::new(SeededSource::new(seed));
            let mode = GeneratorMode::from(mode);
            let generator = build_generator(mode, params, Arc::clone(&source))?;
            let summary = simulate(generator.as_ref(), draws);
            let report = SimulationReport {
                generated_at: Utc::now(),
                mode: mode.as_str().to_string(),
                seed_hash: source.seed_hash_hex(),
                target_rtp: params.target_rtp,
                draws: summary.draws,
                high_payouts: summary.high_payouts,
                total_payout: summary.total_payout,
                realized_rtp: summary.realized_rtp,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::ExportCsv {
            path,
            params,
            draws,
            seed,
        } => {
            let params = params.validated()?;
            let generator = StatefulGenerator::new(params, SeededSource::new(seed))?;
            let mut wtr = csv::Writer::from_path(&path)?;
            for index in 0..draws {
                let draw = generator.draw();
                wtr.serialize(DrawRecord {
                    index,
                    probability: draw.probability,
                    multiplier: draw.multiplier,
                    balance: draw.balance,
                })?;
            }
            wtr.flush()?;
            println!("Exported {} draws to {}", draws, path);
        }
    }

    Ok(())
}
