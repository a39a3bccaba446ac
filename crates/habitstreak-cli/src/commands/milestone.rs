use clap::Subcommand;
use habitstreak_core::MilestoneTracker;

#[derive(Subcommand)]
pub enum MilestoneAction {
    /// List the milestone ladder
    List,
    /// Show the milestone state for a streak length
    Show {
        /// Streak length
        streak: u32,
    },
    /// List milestones crossed going from one streak length to another
    Unlocked {
        /// Streak before the change
        old: u32,
        /// Streak after the change
        new: u32,
    },
}

pub fn run(action: MilestoneAction) -> Result<(), Box<dyn std::error::Error>> {
    let tracker = MilestoneTracker::default();

    match action {
        MilestoneAction::List => {
            println!("{}", serde_json::to_string_pretty(tracker.ladder())?);
        }
        MilestoneAction::Show { streak } => {
            println!("{}", serde_json::to_string_pretty(&tracker.state(streak))?);
        }
        MilestoneAction::Unlocked { old, new } => {
            let unlocked = tracker.newly_unlocked(old, new);
            tracing::debug!("{} milestones unlocked between {} and {}", unlocked.len(), old, new);
            println!("{}", serde_json::to_string_pretty(&unlocked)?);
        }
    }
    Ok(())
}
