use chrono::Utc;
use tracing::{error, info};

use crate::config::{Config, ENDPOINT, RETRY_PERIOD};
use crate::error::Result;
use crate::practicum::{check_response, parse_status, HomeworkApi, PracticumClient};
use crate::telegram::{Notifier, TelegramNotifier};

/// Last messages sent over each branch of the loop, kept to suppress
/// duplicate notifications. In-memory only; reset on restart.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PollState {
    pub last_status: String,
    pub last_error: String,
}

async fn poll_once<A: HomeworkApi + ?Sized>(api: &A, from_date: i64) -> Result<String> {
    let response = api.get_homework_statuses(from_date).await?;
    let homework = check_response(&response)?;
    parse_status(homework.as_ref())
}

/// One fetch/validate/derive/notify cycle. Returns the updated dedup state.
///
/// A derived status message is sent only when it differs from the last one
/// sent; any per-iteration failure is rendered as an error message, logged,
/// and relayed under the same dedup rule. Errors never escape this function.
pub async fn run_iteration<A, N>(
    api: &A,
    notifier: &N,
    from_date: i64,
    state: PollState,
) -> PollState
where
    A: HomeworkApi + ?Sized,
    N: Notifier + ?Sized,
{
    match poll_once(api, from_date).await {
        Ok(message) => {
            if state.last_status != message {
                info!("Homework status changed: {}", message);
                notifier.send(&message).await;
                PollState {
                    last_status: message,
                    ..state
                }
            } else {
                state
            }
        }
        Err(e) => {
            let message = format!("Сбой в работе программы: {}", e);
            error!("{}", message);
            if state.last_error != message {
                notifier.send(&message).await;
                PollState {
                    last_error: message,
                    ..state
                }
            } else {
                state
            }
        }
    }
}

/// Poll the homework endpoint forever, sleeping `RETRY_PERIOD` between
/// iterations. Never returns except on a startup configuration error.
pub async fn run(config: &Config) -> Result<()> {
    let chat_id = config.chat_id()?;
    let client = PracticumClient::new(&config.practicum_token);
    let notifier = TelegramNotifier::new(&config.telegram_token, chat_id);

    // The cursor is read once at startup and never advanced from the
    // response's current_date, so every poll re-requests from this origin.
    let from_date = Utc::now().timestamp();

    info!(
        "Polling {} every {}s (from_date={})",
        ENDPOINT,
        RETRY_PERIOD.as_secs(),
        from_date
    );

    let mut state = PollState::default();
    loop {
        state = run_iteration(&client, &notifier, from_date, state).await;
        tokio::time::sleep(RETRY_PERIOD).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BotError;
    use crate::practicum::client::MockHomeworkApi;
    use crate::practicum::types::NOT_STARTED;
    use crate::telegram::MockNotifier;
    use serde_json::json;

    fn approved_response() -> serde_json::Value {
        json!({
            "homeworks": [{"homework_name": "hw1", "status": "approved"}],
            "current_date": 1,
        })
    }

    #[tokio::test]
    async fn test_identical_statuses_notify_once() {
        let mut api = MockHomeworkApi::new();
        api.expect_get_homework_statuses()
            .times(2)
            .returning(|_| Ok(approved_response()));

        let mut notifier = MockNotifier::new();
        notifier.expect_send().times(1).return_const(());

        let state = run_iteration(&api, &notifier, 0, PollState::default()).await;
        assert!(state.last_status.contains("hw1"));

        let state = run_iteration(&api, &notifier, 0, state).await;
        assert!(state.last_status.contains("hw1"));
        assert!(state.last_error.is_empty());
    }

    #[tokio::test]
    async fn test_identical_errors_notify_once() {
        let mut api = MockHomeworkApi::new();
        api.expect_get_homework_statuses()
            .times(2)
            .returning(|_| Err(BotError::Endpoint(reqwest::StatusCode::INTERNAL_SERVER_ERROR)));

        let mut notifier = MockNotifier::new();
        notifier.expect_send().times(1).return_const(());

        let state = run_iteration(&api, &notifier, 0, PollState::default()).await;
        let state = run_iteration(&api, &notifier, 0, state).await;

        assert!(state.last_error.contains("Сбой в работе программы"));
        assert!(state.last_status.is_empty());
    }

    #[tokio::test]
    async fn test_status_change_notifies_again() {
        let response = json!({
            "homeworks": [{"homework_name": "hw1", "status": "reviewing"}],
            "current_date": 1,
        });

        let mut api = MockHomeworkApi::new();
        let mut seq = mockall::Sequence::new();
        api.expect_get_homework_statuses()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Ok(response.clone()));
        api.expect_get_homework_statuses()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(approved_response()));

        let mut notifier = MockNotifier::new();
        notifier.expect_send().times(2).return_const(());

        let state = run_iteration(&api, &notifier, 0, PollState::default()).await;
        let state = run_iteration(&api, &notifier, 0, state).await;
        assert!(state.last_status.contains("hw1"));
    }

    #[tokio::test]
    async fn test_error_then_recovery_notifies_both() {
        let mut api = MockHomeworkApi::new();
        let mut seq = mockall::Sequence::new();
        api.expect_get_homework_statuses()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(BotError::Endpoint(reqwest::StatusCode::BAD_GATEWAY)));
        api.expect_get_homework_statuses()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(json!({"homeworks": [], "current_date": 1})));

        let mut notifier = MockNotifier::new();
        notifier.expect_send().times(2).return_const(());

        let state = run_iteration(&api, &notifier, 0, PollState::default()).await;
        assert!(!state.last_error.is_empty());

        let state = run_iteration(&api, &notifier, 0, state).await;
        assert_eq!(state.last_status, NOT_STARTED);
        // The error branch keeps its own dedup string independently.
        assert!(!state.last_error.is_empty());
    }

    #[tokio::test]
    async fn test_empty_homeworks_sends_not_started() {
        let mut api = MockHomeworkApi::new();
        api.expect_get_homework_statuses()
            .times(1)
            .returning(|_| Ok(json!({"homeworks": [], "current_date": 1})));

        let mut notifier = MockNotifier::new();
        notifier
            .expect_send()
            .times(1)
            .withf(|text| text == NOT_STARTED)
            .return_const(());

        let state = run_iteration(&api, &notifier, 0, PollState::default()).await;
        assert_eq!(state.last_status, NOT_STARTED);
    }

    #[tokio::test]
    async fn test_malformed_response_goes_to_error_branch() {
        let mut api = MockHomeworkApi::new();
        api.expect_get_homework_statuses()
            .times(1)
            .returning(|_| Ok(json!({"current_date": 1})));

        let mut notifier = MockNotifier::new();
        notifier.expect_send().times(1).return_const(());

        let state = run_iteration(&api, &notifier, 0, PollState::default()).await;
        assert!(state.last_error.contains("homeworks"));
        assert!(state.last_status.is_empty());
    }
}
