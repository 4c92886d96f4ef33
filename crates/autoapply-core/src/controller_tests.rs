use super::*;
use crate::actuate::WidgetActuator;
use crate::pacing::Pacer;
use crate::profile::ProfileAccessor;
use crate::resolve::KeywordResolver;
use crate::testing::{choice_question, FakeForm, FakePage};
use crate::wizard::{RunOutcome, WizardPhase};
use autoapply_config::{ActuatorConfig, WizardConfig};
use autoapply_protocols::{Confirmation, Notification};
use serde_json::json;
use tokio::sync::mpsc;

fn driver() -> Arc<WizardDriver> {
    Arc::new(WizardDriver::new(
        Arc::new(KeywordResolver::builtin().unwrap()),
        Arc::new(ProfileAccessor::from_value(json!({"jobPreferences": {"hybridWork": true}})).unwrap()),
        WidgetActuator::new(Pacer::instant(), &ActuatorConfig::default()),
        Pacer::instant(),
        WizardConfig::default(),
    ))
}

fn submit_form() -> Vec<FakeForm> {
    vec![
        FakeForm {
            containers: vec![choice_question("hybrid", "Hybrid work?", &["Yes", "No"])],
            review_btn: true,
            ..Default::default()
        },
        FakeForm {
            submit_btn: true,
            ..Default::default()
        },
    ]
}

fn controller(page: Arc<FakePage>) -> (RunController, mpsc::UnboundedReceiver<Notification>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (RunController::new(driver(), page, Arc::new(tx)), rx)
}

async fn wait_for_phase(controller: &RunController, phase: WizardPhase) {
    for _ in 0..1000 {
        if controller.progress().phase() == phase {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("run never reached {phase}");
}

#[tokio::test]
async fn test_second_start_is_rejected() {
    let gate = CancellationToken::new();
    let page = Arc::new(FakePage::new(submit_form()).gated(gate.clone()));
    let (controller, mut rx) = controller(page.clone());

    let handle = controller.start().unwrap();
    wait_for_phase(&controller, WizardPhase::AnsweringPage).await;

    assert!(matches!(controller.start(), Err(RunError::AlreadyRunning)));
    assert_eq!(
        controller.handle(ControlRequest::Start),
        ControlResponse::rejected("already running")
    );
    assert!(controller.is_running());

    gate.cancel();
    let report = handle.join().await.unwrap();
    assert!(report.success());
    assert!(!controller.is_running());

    let notification = rx.recv().await.unwrap();
    assert_eq!(notification.run_id(), 1);
    assert!(rx.try_recv().is_err());
    assert_eq!(page.activation_count("entry"), 1);
}

#[tokio::test]
async fn test_failed_run_clears_running_flag() {
    let page = Arc::new(FakePage::new(vec![FakeForm::default()]).without_entry());
    let (controller, mut rx) = controller(page);

    let report = controller.start().unwrap().join().await.unwrap();
    assert!(matches!(report.outcome, RunOutcome::Failed(RunError::EntryPointMissing)));
    assert!(!controller.is_running());
    assert_eq!(
        rx.recv().await.unwrap(),
        Notification::failed(1, "entry point not found")
    );

    let second = controller.start().unwrap();
    assert_eq!(second.run_id, 2);
    second.join().await.unwrap();
}

#[tokio::test]
async fn test_successful_run_counts_as_applied() {
    let page = Arc::new(FakePage::new(submit_form()));
    let (controller, mut rx) = controller(page);

    controller.start().unwrap().join().await.unwrap();
    assert_eq!(
        rx.recv().await.unwrap(),
        Notification::completed(1, Confirmation::Confirmed)
    );
    assert_eq!(
        controller.handle(ControlRequest::Status),
        ControlResponse::Status {
            is_running: false,
            total_applied: 1,
            current_page: 1,
        }
    );
}

#[tokio::test]
async fn test_stop_ends_run_as_stopped() {
    let gate = CancellationToken::new();
    let page = Arc::new(FakePage::new(submit_form()).gated(gate.clone()));
    let (controller, mut rx) = controller(page.clone());

    let handle = controller.start().unwrap();
    wait_for_phase(&controller, WizardPhase::AnsweringPage).await;
    assert_eq!(
        controller.handle(ControlRequest::Stop),
        ControlResponse::Stop { success: true }
    );
    gate.cancel();

    let report = handle.join().await.unwrap();
    assert!(matches!(report.outcome, RunOutcome::Completed(Confirmation::Stopped)));
    assert_eq!(page.activation_count("hybrid-yes"), 0);
    assert_eq!(controller.total_applied(), 0);
    assert!(!rx.recv().await.unwrap().success());
}

#[tokio::test]
async fn test_stop_without_run_is_harmless() {
    let page = Arc::new(FakePage::new(submit_form()));
    let (controller, _rx) = controller(page);
    assert!(!controller.stop());

    let report = controller.start().unwrap().join().await.unwrap();
    assert!(report.success());
}
