use tracing::info_span;
use uuid::Uuid;

use super::config::TrialRunConfig;
use super::errors::SimulationError;
use super::report::{TrialRunReport, TrialSummary};
use crate::mdp::{Mdp, MdpAgent};
use crate::observe::{LogObserver, TrialObserver};

/// Run `agent` through `num_trials` trials of `mdp`, logging through [`LogObserver`].
pub fn run_mdp<M, A>(
    mdp: &mut M,
    agent: &mut A,
    num_trials: usize,
) -> Result<TrialRunReport, SimulationError>
where
    M: Mdp,
    A: MdpAgent<M>,
{
    run_mdp_with(mdp, agent, &TrialRunConfig::new(num_trials), &mut LogObserver)
}

/// [`run_mdp`] with an explicit config and observer.
pub fn run_mdp_with<M, A, O>(
    mdp: &mut M,
    agent: &mut A,
    config: &TrialRunConfig,
    observer: &mut O,
) -> Result<TrialRunReport, SimulationError>
where
    M: Mdp,
    A: MdpAgent<M>,
    O: TrialObserver<M> + ?Sized,
{
    let run_id = Uuid::new_v4();
    let span = info_span!("run_mdp", %run_id);
    let _enter = span.enter();

    let num_trials = config.num_trials;
    let mut report = TrialRunReport::new(run_id);
    observer.on_run_start(run_id, num_trials);

    for trial_num in 1..=num_trials {
        observer.on_trial_start(trial_num, num_trials);
        let steps = run_trial(mdp, agent, observer)?;
        let summary = TrialSummary {
            trial_num,
            total_reward: mdp.total_reward(),
            timesteps: mdp.timesteps(),
            steps,
        };
        observer.on_trial_end(&summary);
        report.trials.push(summary);
    }

    observer.on_run_end(&report, agent.weights());
    Ok(report)
}

/// One trial from reset to a terminal state. Returns the number of steps taken.
fn run_trial<M, A, O>(mdp: &mut M, agent: &mut A, observer: &mut O) -> Result<usize, SimulationError>
where
    M: Mdp,
    A: MdpAgent<M>,
    O: TrialObserver<M> + ?Sized,
{
    mdp.reset()?;

    let mut steps = 0;
    while !mdp.is_terminal() {
        let action = agent.get_next_action(mdp.snapshot())?;

        // Must be taken before the step so the update never sees t+1 in prev_state.
        let prev_state = mdp.snapshot();
        let (reward, terminal) = mdp.step(&action)?;

        agent.update(&prev_state, mdp, reward, &action, terminal)?;
        observer.on_step(&action, reward, terminal);
        steps += 1;
    }

    Ok(steps)
}
