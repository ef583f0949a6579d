//! Process transport tests. They use standard Unix tools as players.

#![cfg(unix)]

use std::time::Duration;
use strictly_morris::{
    ChannelError, PlayerChannel, ProcessPlayer, Received, RefereeConfig, Seats, TicTacToe,
    TurnController,
};

const DEADLINE: Duration = Duration::from_secs(2);

#[tokio::test]
async fn test_cat_echoes_lines() {
    let mut player = ProcessPlayer::spawn("echo", "cat", false).unwrap();
    player.send_line("h1 d1 r0").await.unwrap();
    assert_eq!(
        player.receive_line(DEADLINE).await,
        Received::Line("h1 d1 r0".to_string())
    );
    player.shutdown().await;
}

#[tokio::test]
async fn test_silent_process_times_out() {
    let mut player = ProcessPlayer::spawn("sleeper", "sleep 5", false).unwrap();
    assert_eq!(
        player.receive_line(Duration::from_millis(100)).await,
        Received::TimedOut
    );
    player.shutdown().await;
}

#[tokio::test]
async fn test_exited_process_is_closed() {
    let mut player = ProcessPlayer::spawn("quitter", "true", false).unwrap();
    assert_eq!(player.receive_line(DEADLINE).await, Received::Closed);
}

#[tokio::test]
async fn test_unrequested_output_is_visible() {
    let mut player = ProcessPlayer::spawn("echo", "cat", false).unwrap();
    player.send_line("blue").await.unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(player.poll_unsolicited(), Some("blue".to_string()));
    assert_eq!(player.poll_unsolicited(), None);
    player.shutdown().await;
}

#[tokio::test]
async fn test_bad_commands() {
    assert!(matches!(
        ProcessPlayer::spawn("nobody", "   ", false),
        Err(ChannelError::EmptyCommand)
    ));
    assert!(matches!(
        ProcessPlayer::spawn("nobody", "/definitely/not/a/program", false),
        Err(ChannelError::Spawn { .. })
    ));
}

#[tokio::test]
async fn test_scripted_shell_players_finish_a_match() {
    let dir = tempfile::tempdir().unwrap();
    let blue = dir.path().join("blue.sh");
    let orange = dir.path().join("orange.sh");
    std::fs::write(
        &blue,
        "read color\necho a1\nread m\necho a2\nread m\necho a3\nread m\n",
    )
    .unwrap();
    std::fs::write(
        &orange,
        "read color\nread m\necho b1\nread m\necho b2\nread m\n",
    )
    .unwrap();

    let seats = Seats::new(
        Box::new(ProcessPlayer::spawn("blue", &format!("sh {}", blue.display()), false).unwrap()),
        Box::new(
            ProcessPlayer::spawn("orange", &format!("sh {}", orange.display()), false).unwrap(),
        ),
    );
    let config = RefereeConfig::default().with_move_timeout_ms(2000);
    let report = TurnController::new(TicTacToe::new(), seats, &config)
        .run()
        .await;

    assert_eq!(
        report.message(),
        "END: blue WINS! orange LOSES! blue has three in a row!"
    );
}
