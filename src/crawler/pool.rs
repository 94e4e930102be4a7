//! Bounded worker pool
//!
//! Fan-out/fan-in over two channels:
//! - a job queue filled with every URL up front and then closed
//! - a result stream that closes only after every worker has stopped
//!
//! Workers share the job receiver behind a mutex and each hold a clone of
//! the result sender. A supervisory task owns the original sender and a
//! [`JoinSet`] of the workers; it drops the sender once the set is drained,
//! which is the single point where the result stream closes.

use crate::crawler::fetcher::{fetch_url, PageResult};
use crate::output::CrawlReport;
use reqwest::Client;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tracing::{debug, error, info};

type SharedJobs = Arc<Mutex<mpsc::Receiver<String>>>;

/// A fixed-size pool of fetch workers sharing one HTTP client
#[derive(Debug, Clone)]
pub struct WorkerPool {
    client: Client,
    workers: NonZeroUsize,
    progress_interval: usize,
}

impl WorkerPool {
    /// Creates a pool of `workers` workers over a shared client
    pub fn new(client: Client, workers: NonZeroUsize) -> Self {
        Self {
            client,
            workers,
            progress_interval: 0,
        }
    }

    /// Logs progress every `interval` collected results (0 disables)
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Number of workers this pool runs
    pub fn workers(&self) -> usize {
        self.workers.get()
    }

    /// Fetches every URL and aggregates the results
    ///
    /// Returns once exactly `urls.len()` results have been collected and
    /// the result stream has closed. Result order is completion order.
    pub async fn run(&self, urls: Vec<String>) -> CrawlReport {
        let total = urls.len();
        let started = Instant::now();

        info!("Starting {} workers for {} URLs", self.workers(), total);

        let mut stream = self.dispatch(urls).await;
        let mut results = Vec::with_capacity(total);
        let mut network_errors = 0;

        while let Some(result) = stream.recv().await {
            if result.is_network_error() {
                network_errors += 1;
            }
            results.push(result);

            if self.progress_interval > 0 && results.len() % self.progress_interval == 0 {
                let elapsed = started.elapsed().as_secs_f64();
                info!(
                    "Progress: {}/{} URLs fetched ({} network errors), {:.2} URLs/sec",
                    results.len(),
                    total,
                    network_errors,
                    results.len() as f64 / elapsed
                );
            }
        }

        let total_time = started.elapsed().as_secs_f64();

        if results.len() != total {
            error!(
                "Collected {} results for {} URLs; a worker stopped abnormally",
                results.len(),
                total
            );
        }

        CrawlReport::from_results(results, total, total_time)
    }

    /// Starts the workers, enqueues all URLs and returns the result stream
    async fn dispatch(&self, urls: Vec<String>) -> mpsc::Receiver<PageResult> {
        let capacity = urls.len().max(1);
        let (jobs_tx, jobs_rx) = mpsc::channel::<String>(capacity);
        let (results_tx, results_rx) = mpsc::channel::<PageResult>(capacity);
        let jobs: SharedJobs = Arc::new(Mutex::new(jobs_rx));

        let mut workers = JoinSet::new();
        for id in 1..=self.workers.get() {
            workers.spawn(run_worker(
                id,
                self.client.clone(),
                Arc::clone(&jobs),
                results_tx.clone(),
            ));
        }

        for url in urls {
            if let Err(e) = jobs_tx.send(url).await {
                error!("Job queue closed early, dropping {}", e.0);
                break;
            }
        }
        // Sole producer: closing the queue lets idle workers exit
        drop(jobs_tx);

        tokio::spawn(async move {
            while let Some(joined) = workers.join_next().await {
                if let Err(e) = joined {
                    error!("Worker task failed: {}", e);
                }
            }
            debug!("All workers finished, closing result stream");
            drop(results_tx);
        });

        results_rx
    }
}

/// Pulls URLs until the queue is empty and closed
async fn run_worker(
    id: usize,
    client: Client,
    jobs: SharedJobs,
    results: mpsc::Sender<PageResult>,
) -> usize {
    let mut processed = 0;

    loop {
        let next = {
            let mut receiver = jobs.lock().await;
            receiver.recv().await
        };

        let Some(url) = next else { break };

        let started = Instant::now();
        debug!("Worker {} fetching {}", id, url);
        let result = fetch_url(&client, &url, started).await;
        debug!(
            "Worker {} finished {} with status {} in {:.3}s",
            id, result.url, result.status, result.time_taken
        );
        processed += 1;

        if let Err(e) = results.send(result).await {
            error!("Worker {} failed to send result: {}", id, e);
            break;
        }
    }

    debug!("Worker {} stopped after {} URLs", id, processed);
    processed
}
