use clap::Subcommand;
use taskrank_core::Strategy;

#[derive(Subcommand)]
pub enum StrategyAction {
    /// List built-in strategies and their weights
    List,
    /// Show the weights a strategy name resolves to
    Show {
        /// Strategy name (unknown names resolve to smart_balance)
        name: String,
    },
}

pub fn run(action: StrategyAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        StrategyAction::List => {
            println!(
                "{:<16} {:>8} {:>10} {:>8} {:>10}",
                "strategy", "urgency", "importance", "effort", "dependency"
            );
            for strategy in Strategy::ALL {
                let w = strategy.weights();
                println!(
                    "{:<16} {:>8.2} {:>10.2} {:>8.2} {:>10.2}",
                    strategy.name(),
                    w.urgency,
                    w.importance,
                    w.effort,
                    w.dependency
                );
            }
        }
        StrategyAction::Show { name } => {
            let strategy = Strategy::resolve(&name);
            if Strategy::from_name(&name).is_none() {
                eprintln!("unknown strategy '{name}', using {strategy}");
            }
            let out = serde_json::json!({
                "strategy": strategy,
                "weights": strategy.weights(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }
    Ok(())
}
