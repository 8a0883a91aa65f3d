//! UseCase: アリーナ（制限時間付きのコーディング）
//!
//! ## 処理の流れ
//! - 開始時にフルスクリーンを 1 回だけ要求する（失敗は warn で記録して続行）
//! - 1 秒ごとに残り時間を減らし、0 になったら 1 回だけ強制提出する
//! - ページシグナルを分類し、不正の場合は `cheat-detected` を送信して失格モーダルを開く
//! - コードの実行と提出は別タスクで行い、その間もシグナルの監視は続く
//! - 遷移先が決まった時点で、実行中のタスクはすべて中断される

use std::sync::Arc;

use codearena_shared::time;
use tokio::{sync::mpsc, task::JoinSet};

use crate::{
    domain::{
        ArenaError, ArenaSession, CheatReason, CodeRunner, EventEmitter, GatewayError, Navigation,
        Notice, PageSignal, Presentation, SolutionSubmitter, SubmitKind,
    },
    infrastructure::timer::CountdownTimer,
};

/// Code shown in the editor when a session starts
pub const STARTER_CODE: &str = "function twoSum(nums, target) {
  // Write your solution here
}";

/// User actions and page signals in the arena
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArenaInput {
    /// Replace the editor contents
    Edit(String),
    Run,
    Submit,
    Signal(PageSignal),
    ConfirmDisqualification,
}

/// What the screen should redraw
#[derive(Debug, Clone, PartialEq)]
pub enum ArenaUpdate {
    /// Seconds left
    Tick(u32),
    RunStarted,
    RunFinished(String),
    Submitting(SubmitKind),
    /// The disqualification modal shows this reason
    CheatDetected(CheatReason),
    Notice(Notice),
    Rejected(ArenaError),
}

/// Ports the arena talks to
#[derive(Clone)]
pub struct ArenaPorts {
    pub emitter: Arc<dyn EventEmitter>,
    pub runner: Arc<dyn CodeRunner>,
    pub submitter: Arc<dyn SolutionSubmitter>,
    pub presentation: Arc<dyn Presentation>,
}

enum Completion {
    Run(Result<String, GatewayError>),
    Submit(Result<(), GatewayError>),
}

pub struct ArenaController {
    session: ArenaSession,
    ports: ArenaPorts,
    source: String,
    updates: mpsc::UnboundedSender<ArenaUpdate>,
    /// In-flight run and submit calls; aborted when the controller is dropped
    tasks: JoinSet<()>,
}

impl ArenaController {
    pub fn new(
        session: ArenaSession,
        ports: ArenaPorts,
        updates: mpsc::UnboundedSender<ArenaUpdate>,
    ) -> Self {
        Self {
            session,
            ports,
            source: STARTER_CODE.to_string(),
            updates,
            tasks: JoinSet::new(),
        }
    }

    pub fn session(&self) -> &ArenaSession {
        &self.session
    }

    /// Drive the session until it ends in a submission or a disqualification.
    pub async fn run(mut self, mut inputs: mpsc::Receiver<ArenaInput>) -> Navigation {
        if let Err(e) = self.ports.presentation.request_fullscreen() {
            tracing::warn!("Fullscreen request failed: {}", e);
        }
        tracing::info!(
            "Arena started for room {} as {}",
            self.session.room_id(),
            self.session.participant_id()
        );

        let mut timer = CountdownTimer::start();
        let (done_tx, mut done_rx) = mpsc::unbounded_channel();
        let mut inputs_open = true;

        loop {
            tokio::select! {
                _ = timer.tick() => {
                    if let Some(kind) = self.session.tick() {
                        tracing::info!("Time is up; submitting automatically");
                        self.start_submit(kind, &done_tx);
                    }
                    if !self.session.is_terminated() {
                        self.publish(ArenaUpdate::Tick(self.session.remaining()));
                    }
                }

                input = inputs.recv(), if inputs_open => match input {
                    Some(input) => {
                        if let Some(navigation) = self.handle(input, &done_tx) {
                            return navigation;
                        }
                    }
                    None => {
                        tracing::debug!("Arena input closed");
                        inputs_open = false;
                    }
                },

                Some(done) = done_rx.recv() => {
                    if let Some(navigation) = self.complete(done) {
                        return navigation;
                    }
                }
            }
        }
    }

    fn handle(
        &mut self,
        input: ArenaInput,
        done_tx: &mpsc::UnboundedSender<Completion>,
    ) -> Option<Navigation> {
        match input {
            ArenaInput::Edit(source) => {
                self.source = source;
                None
            }
            ArenaInput::Run => {
                match self.session.begin_run() {
                    Ok(()) => {
                        self.publish(ArenaUpdate::RunStarted);
                        let runner = self.ports.runner.clone();
                        let source = self.source.clone();
                        let done_tx = done_tx.clone();
                        self.spawn(async move {
                            let result = runner.run(&source).await;
                            let _ = done_tx.send(Completion::Run(result));
                        });
                    }
                    Err(e) => self.publish(ArenaUpdate::Rejected(e)),
                }
                None
            }
            ArenaInput::Submit => {
                match self.session.begin_submit() {
                    Ok(()) => self.start_submit(SubmitKind::Manual, done_tx),
                    Err(e) => self.publish(ArenaUpdate::Rejected(e)),
                }
                None
            }
            ArenaInput::Signal(signal) => {
                let now = time::now_millis();
                let report = self.session.observe(&signal, now)?;
                tracing::warn!(
                    "Cheat detected at {}: {}",
                    time::millis_to_rfc3339(now),
                    report.reason
                );
                if let Err(e) = self.ports.emitter.emit_cheat(&report) {
                    tracing::warn!("Failed to report cheat: {}", e);
                }
                self.publish(ArenaUpdate::CheatDetected(report.reason));
                None
            }
            ArenaInput::ConfirmDisqualification => match self.session.confirm_disqualification() {
                Ok(navigation) => {
                    tracing::info!("Participant {} disqualified", self.session.participant_id());
                    Some(navigation)
                }
                Err(e) => {
                    self.publish(ArenaUpdate::Rejected(e));
                    None
                }
            },
        }
    }

    /// The session is already in `Submitting`
    fn start_submit(&mut self, kind: SubmitKind, done_tx: &mpsc::UnboundedSender<Completion>) {
        self.publish(ArenaUpdate::Submitting(kind));
        let submitter = self.ports.submitter.clone();
        let room_id = self.session.room_id().clone();
        let participant_id = self.session.participant_id().clone();
        let source = self.source.clone();
        let done_tx = done_tx.clone();
        self.spawn(async move {
            let result = submitter
                .submit(&room_id, &participant_id, &source, kind)
                .await;
            let _ = done_tx.send(Completion::Submit(result));
        });
    }

    fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        while self.tasks.try_join_next().is_some() {}
        self.tasks.spawn(task);
    }

    fn complete(&mut self, done: Completion) -> Option<Navigation> {
        match done {
            Completion::Run(Ok(output)) => {
                self.session.finish_run(output.clone());
                self.publish(ArenaUpdate::RunFinished(output));
                None
            }
            Completion::Run(Err(e)) => {
                tracing::warn!("Code run failed: {}", e);
                self.session.finish_run(format!("Run failed: {e}"));
                self.publish(ArenaUpdate::Notice(Notice::error("Failed to run code.")));
                None
            }
            Completion::Submit(Ok(())) => match self.session.finish_submit() {
                Ok(navigation) => {
                    tracing::info!("Solution submitted for room {}", self.session.room_id());
                    Some(navigation)
                }
                Err(e) => {
                    tracing::debug!("Submission finished after the session ended: {}", e);
                    None
                }
            },
            Completion::Submit(Err(e)) => {
                tracing::warn!("Submission failed: {}", e);
                self.session.fail_submit();
                self.publish(ArenaUpdate::Notice(Notice::error(
                    "Failed to submit solution.",
                )));
                None
            }
        }
    }

    fn publish(&self, update: ArenaUpdate) {
        let _ = self.updates.send(update);
    }
}
