use std::{future::Future, time::Duration};

use tokio::time::{Instant, MissedTickBehavior};

use crate::{
    config::ScheduleConfig,
    display::LatestReadings,
    pipeline::{Pipeline, PipelineError, Sink, Source},
};

/// Fixed-interval timer checked by the polling loop.
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    every: Duration,
    last_fired: Instant,
}

impl Timer {
    pub fn new(every: Duration, now: Instant) -> Self {
        Self { every, last_fired: now }
    }

    pub fn next_due(&self) -> Instant {
        self.last_fired + self.every
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_due()
    }

    pub fn mark_fired(&mut self, now: Instant) {
        self.last_fired = now;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Job {
    Fetch,
    PrintLatest,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    pub fetch_cycles: u64,
    pub prints: u64,
}

/// Single-task cooperative scheduler driving the fetch and print jobs.
pub struct Scheduler {
    poll_interval: Duration,
    timers: Vec<(Job, Timer)>,
    latest: LatestReadings,
    stats: SchedulerStats,
}

impl Scheduler {
    pub fn new(cfg: &ScheduleConfig) -> Self {
        let now = Instant::now();
        Self {
            poll_interval: Duration::from_secs(cfg.poll_interval_secs),
            timers: vec![
                (Job::Fetch, Timer::new(Duration::from_secs(cfg.fetch_interval_secs), now)),
                (Job::PrintLatest, Timer::new(Duration::from_secs(cfg.print_interval_secs), now)),
            ],
            latest: LatestReadings::default(),
            stats: SchedulerStats::default(),
        }
    }

    pub fn latest(&self) -> &LatestReadings {
        &self.latest
    }

    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    /// Poll the timers until `shutdown` resolves or a job fails.
    ///
    /// Shutdown is observed between polls; a job that is already running
    /// finishes first.
    pub async fn run<S, K, F>(&mut self, pipeline: &Pipeline<S, K>, shutdown: F) -> Result<(), PipelineError>
    where
        S: Source,
        K: Sink,
        F: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Stopping the weather monitoring.");
                    return Ok(());
                }
                _ = ticker.tick() => {
                    self.run_pending(pipeline).await?;
                }
            }
        }
    }

    /// Run every job whose timer is due, earliest due first.
    pub async fn run_pending<S, K>(&mut self, pipeline: &Pipeline<S, K>) -> Result<(), PipelineError>
    where
        S: Source,
        K: Sink,
    {
        let now = Instant::now();
        let mut due: Vec<usize> = (0..self.timers.len()).filter(|&i| self.timers[i].1.is_due(now)).collect();
        due.sort_by_key(|&i| self.timers[i].1.next_due());

        for i in due {
            let job = self.timers[i].0;
            match job {
                Job::Fetch => {
                    let report = pipeline.run_cycle(&mut self.latest).await?;
                    self.stats.fetch_cycles += 1;
                    tracing::debug!(
                        readings = report.readings,
                        unavailable = report.unavailable,
                        alerts = report.alerts,
                        "fetch cycle complete"
                    );
                }
                Job::PrintLatest => {
                    print!("{}", self.latest.render());
                    self.stats.prints += 1;
                }
            }
            self.timers[i].1.mark_fired(Instant::now());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        alert::TemperatureAlert,
        pipeline::testing::{MemorySink, StaticSource},
    };

    fn pipeline() -> Pipeline<StaticSource, MemorySink> {
        Pipeline::new(
            StaticSource::with(&[("Mumbai", 30.0, "Clear"), ("Chennai", 36.0, "Rain")]),
            TemperatureAlert::new(35.0),
            MemorySink::default(),
            vec!["Mumbai".to_string(), "Chennai".to_string(), "Bangalore".to_string()],
        )
    }

    #[test]
    fn timer_is_due_after_full_interval() {
        let start = Instant::now();
        let mut timer = Timer::new(Duration::from_secs(20), start);

        assert!(!timer.is_due(start));
        assert!(!timer.is_due(start + Duration::from_secs(19)));
        assert!(timer.is_due(start + Duration::from_secs(20)));

        timer.mark_fired(start + Duration::from_secs(23));
        assert!(!timer.is_due(start + Duration::from_secs(40)));
        assert!(timer.is_due(start + Duration::from_secs(43)));
    }

    #[tokio::test(start_paused = true)]
    async fn jobs_fire_on_their_own_intervals() {
        let pipeline = pipeline();
        let mut scheduler = Scheduler::new(&ScheduleConfig::default());

        scheduler
            .run(&pipeline, tokio::time::sleep(Duration::from_secs(70)))
            .await
            .unwrap();

        // fetch at 20/40/60s, print at 15/30/45/60s
        assert_eq!(
            scheduler.stats(),
            SchedulerStats {
                fetch_cycles: 3,
                prints: 4
            }
        );
        assert_eq!(pipeline.sink.written.lock().unwrap().len(), 3);
        assert!(scheduler.latest().render().contains("Bangalore: No data available."));
    }

    #[tokio::test(start_paused = true)]
    async fn immediate_shutdown_runs_no_jobs() {
        let pipeline = pipeline();
        let mut scheduler = Scheduler::new(&ScheduleConfig::default());

        scheduler
            .run(&pipeline, tokio::time::sleep(Duration::from_secs(5)))
            .await
            .unwrap();

        assert_eq!(scheduler.stats(), SchedulerStats::default());
        assert!(scheduler.latest().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn sink_error_stops_the_loop() {
        let pipeline = Pipeline::new(
            StaticSource::with(&[("Mumbai", 30.0, "Clear")]),
            TemperatureAlert::new(35.0),
            MemorySink {
                fail: true,
                ..MemorySink::default()
            },
            vec!["Mumbai".to_string()],
        );
        let mut scheduler = Scheduler::new(&ScheduleConfig::default());

        let res = scheduler
            .run(&pipeline, tokio::time::sleep(Duration::from_secs(600)))
            .await;

        assert!(matches!(res, Err(PipelineError::Sink(_))));
        assert_eq!(scheduler.stats().fetch_cycles, 0);
    }
}
