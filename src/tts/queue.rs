//! Serialized speech queue
//!
//! Uses a channel-based architecture: a dedicated speech thread owns a
//! current-thread runtime and drives the engine one job at a time, so
//! overlapping `speak` calls never interleave audio. Producers never block.

use super::{Prosody, SpeechRequest, TtsEngine, DEFAULT_RATE, DEFAULT_VOLUME};
use crate::error::{HalError, HalResult};
use std::sync::{mpsc, Arc, Condvar, Mutex, PoisonError};
use std::thread;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Jobs sent to the speech thread
#[derive(Debug)]
enum SpeechJob {
    Speak(SpeechRequest),
    Pause(Duration),
}

/// Set once the worker has left its loop, even if it panicked
#[derive(Debug, Default)]
struct Finished {
    done: Mutex<bool>,
    signal: Condvar,
}

struct FinishGuard(Arc<Finished>);

impl Drop for FinishGuard {
    fn drop(&mut self) {
        let mut done = self.0.done.lock().unwrap_or_else(PoisonError::into_inner);
        *done = true;
        self.0.signal.notify_all();
    }
}

/// Thread-safe handle to the single speech worker
#[derive(Debug)]
pub struct SpeechQueue {
    sender: Mutex<Option<mpsc::Sender<SpeechJob>>>,
    worker: Mutex<Option<thread::JoinHandle<()>>>,
    finished: Arc<Finished>,
    engine: Arc<dyn TtsEngine>,
    default_volume: i32,
    default_rate: i32,
}

impl SpeechQueue {
    pub fn new(engine: Arc<dyn TtsEngine>) -> HalResult<Self> {
        Self::with_defaults(engine, DEFAULT_VOLUME, DEFAULT_RATE)
    }

    /// Start the worker; `volume` and `rate` apply when a call leaves them unset
    pub fn with_defaults(engine: Arc<dyn TtsEngine>, volume: i32, rate: i32) -> HalResult<Self> {
        let (sender, receiver) = mpsc::channel::<SpeechJob>();

        let finished = Arc::new(Finished::default());
        let guard = FinishGuard(finished.clone());
        let worker_engine = engine.clone();
        let worker = thread::Builder::new()
            .name("speech-worker".to_string())
            .spawn(move || {
                let _guard = guard;
                Self::speech_thread(worker_engine, receiver)
            })?;

        Ok(Self {
            sender: Mutex::new(Some(sender)),
            worker: Mutex::new(Some(worker)),
            finished,
            engine,
            default_volume: volume,
            default_rate: rate,
        })
    }

    fn speech_thread(engine: Arc<dyn TtsEngine>, receiver: mpsc::Receiver<SpeechJob>) {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                error!("❌ Failed to start speech runtime: {}", e);
                return;
            }
        };

        info!("🔊 Speech worker started ({})", engine.name());

        while let Ok(job) = receiver.recv() {
            match job {
                SpeechJob::Speak(request) => {
                    debug!(
                        "🗣️ Speaking [vol {} rate {}]: {}",
                        request.volume(),
                        request.rate(),
                        request.text()
                    );
                    if let Err(e) = runtime.block_on(engine.speak(&request)) {
                        error!("❌ Speech failed for '{}': {}", request.text(), e);
                    }
                }
                SpeechJob::Pause(duration) => {
                    debug!("⏸️ Pausing speech for {:?}", duration);
                    thread::sleep(duration);
                }
            }
        }

        info!("🔇 Speech worker stopped");
    }

    fn submit(&self, job: SpeechJob) -> HalResult<()> {
        let sender = self.sender.lock()?;
        match sender.as_ref() {
            Some(tx) => tx.send(job).map_err(|_| HalError::QueueClosed),
            None => Err(HalError::QueueClosed),
        }
    }

    /// Queue `text` with the default volume and rate
    pub fn speak(&self, text: impl Into<String>) -> HalResult<()> {
        self.speak_with(text, Prosody::default())
    }

    /// Queue `text`; out-of-range volume and rate are clamped
    pub fn speak_with(&self, text: impl Into<String>, prosody: Prosody) -> HalResult<()> {
        let request = SpeechRequest::new(
            text,
            prosody.volume.unwrap_or(self.default_volume),
            prosody.rate.unwrap_or(self.default_rate),
        );
        self.submit(SpeechJob::Speak(request))
    }

    /// Queue a silent pause that holds back everything queued after it
    pub fn wait(&self, duration: Duration) -> HalResult<()> {
        self.submit(SpeechJob::Pause(duration))
    }

    /// Stop accepting work. Jobs already queued still run; the caller does not wait.
    pub fn shutdown(&self) {
        let mut sender = match self.sender.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if sender.take().is_some() {
            info!("🛑 Speech queue closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.sender.lock().map(|s| s.is_none()).unwrap_or(true)
    }

    /// Shut down and wait up to `grace` for queued speech to finish.
    /// Returns whether the worker finished in time. Safe to call from
    /// several threads; every caller waits for the same worker.
    pub fn drain(&self, grace: Duration) -> bool {
        self.shutdown();

        let done = self
            .finished
            .done
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let (done, _) = self
            .finished
            .signal
            .wait_timeout_while(done, grace, |done| !*done)
            .unwrap_or_else(PoisonError::into_inner);
        if !*done {
            warn!("⚠️ Speech queue still busy after {:?}, leaving it", grace);
            return false;
        }
        drop(done);

        let handle = self
            .worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            if handle.join().is_err() {
                error!("❌ Speech worker panicked");
            }
        }
        true
    }

    /// Voices offered by the engine, numbered from 1
    pub fn avatars(&self) -> Vec<String> {
        self.engine
            .voices()
            .iter()
            .enumerate()
            .map(|(index, voice)| format!("{}: {}", index + 1, voice))
            .collect()
    }

    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }
}

impl Drop for SpeechQueue {
    fn drop(&mut self) {
        self.shutdown();
    }
}
