//! Fan-out of recognition attempts and fan-in of their hypotheses.

use std::time::Duration;

use bytes::Bytes;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::Error;
use crate::lang::Language;
use crate::speech::{Alternative, SpeechClient, parse};

/// Default time budget for one recognition pass across all languages.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(30);

/// The winning recognition outcome for one language.
#[derive(Debug, Clone, Serialize)]
pub struct Hypothesis {
    pub language: Language,
    pub alternative: Alternative,
}

/// What one language attempt reported back to the aggregator.
///
/// Failures and absences are carried so they can be logged and excluded
/// without ever interrupting sibling attempts.
enum Report {
    Hit(Hypothesis),
    Absent(Language),
    Failed(Language, Error),
}

/// Races all candidate languages against the recognition service.
pub struct Recognizer {
    client: SpeechClient,
    deadline: Duration,
}

impl Recognizer {
    /// Create a recognizer with the default endpoint and deadline.
    ///
    /// # Arguments
    /// * `api_key` - Opaque credential for the recognition service
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self, Error> {
        Ok(Self { client: SpeechClient::new(api_key)?, deadline: DEFAULT_DEADLINE })
    }

    /// Override the overall collection deadline.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Override the recognition endpoint (tests, proxies).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.client = self.client.with_endpoint(endpoint);
        self
    }

    /// Recognize one audio sample, racing every candidate language.
    ///
    /// Every language in [`Language::ALL`] is attempted concurrently; each
    /// attempt reports exactly once into the collection channel. Collection
    /// stops when all attempts have reported or the deadline (measured from
    /// dispatch start) fires, whichever comes first; attempts still in
    /// flight at that point are cancelled and their results never consulted.
    ///
    /// # Arguments
    /// * `audio` - Raw audio bytes in the service's expected encoding,
    ///   shared read-only across all attempts
    ///
    /// # Returns
    /// The hypothesis with the highest confidence among all successful
    /// attempts; ties go to the first one observed.
    ///
    /// # Errors
    /// Returns [`Error::NoResult`] if no attempt produced a usable
    /// transcription before the deadline. Per-language failures are logged
    /// and excluded, never propagated.
    pub async fn listen(&self, audio: Bytes) -> Result<Hypothesis, Error> {
        let deadline = Instant::now() + self.deadline;
        let cancel = CancellationToken::new();
        let (report_tx, mut report_rx) = mpsc::channel::<Report>(Language::ALL.len());

        for language in Language::ALL {
            let client = self.client.clone();
            let audio = audio.clone();
            let tx = report_tx.clone();
            let cancel = cancel.clone();

            tokio::spawn(async move {
                tokio::select! {
                    report = attempt(&client, audio, language) => {
                        // Receiver gone means the aggregator already returned
                        let _ = tx.send(report).await;
                    }
                    _ = cancel.cancelled() => {
                        debug!("{} attempt abandoned", language);
                    }
                }
            });
        }

        // The attempt tasks hold the only senders now
        drop(report_tx);

        let best = collect_best(&mut report_rx, Language::ALL.len(), deadline).await;

        // Abandon in-flight attempts so their HTTP calls are dropped
        cancel.cancel();

        match best {
            Some(hypothesis) => {
                info!("🎯 {} wins: \"{}\" (confidence {:.2})", hypothesis.language, hypothesis.alternative.transcript, hypothesis.alternative.confidence);
                Ok(hypothesis)
            }
            None => Err(Error::NoResult),
        }
    }
}

/// Run one language attempt: recognition request, then response parsing.
async fn attempt(client: &SpeechClient, audio: Bytes, language: Language) -> Report {
    let body = match client.recognize(audio, language).await {
        Ok(body) => body,
        Err(err) => return Report::Failed(language, err),
    };

    match parse(&body) {
        Ok(Some(alternative)) => Report::Hit(Hypothesis { language, alternative }),
        Ok(None) => Report::Absent(language),
        Err(err) => Report::Failed(language, err),
    }
}

/// Collect reports in arrival order until all attempts reported or the
/// deadline fires, keeping the most confident hypothesis.
///
/// The deadline is an absolute instant computed once at dispatch start, not
/// re-armed per iteration. Ties keep the earlier arrival: a later hypothesis
/// replaces the running best only on strictly greater confidence.
async fn collect_best(report_rx: &mut mpsc::Receiver<Report>, attempts: usize, deadline: Instant) -> Option<Hypothesis> {
    let mut best: Option<Hypothesis> = None;
    let mut pending = attempts;

    while pending > 0 {
        let report = tokio::select! {
            report = report_rx.recv() => match report {
                Some(report) => report,
                None => break,
            },
            _ = tokio::time::sleep_until(deadline) => {
                warn!("Deadline elapsed with {} attempt(s) still pending", pending);
                break;
            }
        };
        pending -= 1;

        match report {
            Report::Hit(hypothesis) => {
                debug!("{}: \"{}\" (confidence {:.2})", hypothesis.language, hypothesis.alternative.transcript, hypothesis.alternative.confidence);
                if best.as_ref().is_none_or(|b| b.alternative.confidence < hypothesis.alternative.confidence) {
                    best = Some(hypothesis);
                }
            }
            Report::Absent(language) => debug!("{}: no speech detected", language),
            Report::Failed(language, err) => warn!("{}: attempt failed: {}", language, err),
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(language: Language, transcript: &str, confidence: f64) -> Report {
        Report::Hit(Hypothesis { language, alternative: Alternative { transcript: transcript.to_string(), confidence } })
    }

    fn decode_failure(language: Language) -> Report {
        let err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        Report::Failed(language, Error::Decode(err))
    }

    fn far_deadline() -> Instant {
        Instant::now() + Duration::from_secs(30)
    }

    #[tokio::test(start_paused = true)]
    async fn keeps_the_highest_confidence_regardless_of_arrival_order() {
        let (tx, mut rx) = mpsc::channel(3);
        tx.send(hit(Language::French, "bonjour", 0.4)).await.unwrap();
        tx.send(hit(Language::Spanish, "hola", 0.95)).await.unwrap();
        tx.send(hit(Language::English, "hello", 0.8)).await.unwrap();
        drop(tx);

        let best = collect_best(&mut rx, 3, far_deadline()).await.unwrap();
        assert_eq!(best.language, Language::Spanish);
        assert_eq!(best.alternative.confidence, 0.95);
    }

    #[tokio::test(start_paused = true)]
    async fn first_arrival_wins_a_confidence_tie() {
        let (tx, mut rx) = mpsc::channel(2);
        tx.send(hit(Language::German, "hallo", 0.7)).await.unwrap();
        tx.send(hit(Language::Italian, "ciao", 0.7)).await.unwrap();
        drop(tx);

        let best = collect_best(&mut rx, 2, far_deadline()).await.unwrap();
        assert_eq!(best.language, Language::German);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_and_absent_attempts_never_win() {
        let (tx, mut rx) = mpsc::channel(3);
        tx.send(decode_failure(Language::English)).await.unwrap();
        tx.send(Report::Absent(Language::Greek)).await.unwrap();
        tx.send(hit(Language::French, "bonjour", 0.1)).await.unwrap();
        drop(tx);

        let best = collect_best(&mut rx, 3, far_deadline()).await.unwrap();
        assert_eq!(best.language, Language::French);
    }

    #[tokio::test(start_paused = true)]
    async fn no_usable_reports_yields_none() {
        let (tx, mut rx) = mpsc::channel(2);
        tx.send(decode_failure(Language::English)).await.unwrap();
        tx.send(Report::Absent(Language::Spanish)).await.unwrap();
        drop(tx);

        assert!(collect_best(&mut rx, 2, far_deadline()).await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_before_any_arrival_yields_none() {
        let (tx, mut rx) = mpsc::channel::<Report>(1);

        let best = collect_best(&mut rx, 1, far_deadline()).await;

        assert!(best.is_none());
        drop(tx);
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_selects_over_the_completed_subset_only() {
        let (tx, mut rx) = mpsc::channel(2);
        tx.send(hit(Language::English, "hello", 0.8)).await.unwrap();

        // A straggler that would win, arriving well past the deadline
        let straggler = tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(60)).await;
            let _ = straggler.send(hit(Language::Spanish, "hola", 0.99)).await;
        });
        drop(tx);

        let best = collect_best(&mut rx, 2, Instant::now() + Duration::from_secs(30)).await.unwrap();
        assert_eq!(best.language, Language::English);
        assert_eq!(best.alternative.confidence, 0.8);
    }
}
