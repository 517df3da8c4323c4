use quiz_core::model::{Topic, TopicSet};

use super::test_harness::setup_view_harness;

#[tokio::test(flavor = "current_thread")]
async fn intro_renders_on_launch() {
    let mut harness = setup_view_harness(1, 0);
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("QuickMath"), "missing title in {html}");
    assert!(
        html.contains("against the clock"),
        "missing tagline in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn menu_shows_the_persisted_best() {
    let mut harness = setup_view_harness(1, 77);
    harness.rebuild();
    harness.game.show_menu();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Best score: 77"), "missing best in {html}");
    assert!(html.contains("Start"), "missing start button in {html}");
    assert!(
        html.contains("All topics enabled"),
        "missing selection line in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn topics_screen_lists_the_full_catalogue() {
    let mut harness = setup_view_harness(1, 0);
    harness.rebuild();
    harness.game.show_menu();
    harness.game.open_topics();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    for topic in Topic::ALL {
        assert!(
            html.contains(topic.label()),
            "missing {} in {html}",
            topic.label()
        );
    }
    assert!(
        html.contains("topics-start"),
        "missing start button in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn game_screen_shows_a_question_and_the_scoreboard() {
    let mut harness = setup_view_harness(7, 0);
    harness.rebuild();
    harness
        .game
        .start_game(TopicSet::from_topics([Topic::Add]))
        .unwrap();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Score: 0"), "missing scoreboard in {html}");
    assert!(html.contains("Addition"), "missing topic label in {html}");
    assert!(html.contains("game-answer"), "missing answer input in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn puzzle_rounds_render_the_grid_and_options() {
    let mut harness = setup_view_harness(5, 0);
    harness.rebuild();
    harness
        .game
        .start_game(TopicSet::from_topics([Topic::Puzzle]))
        .unwrap();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("puzzle-grid"), "missing grid in {html}");
    // The one blank cell renders as a placeholder.
    assert!(html.contains('?'), "missing blank cell in {html}");
    assert!(
        !html.contains("game-answer"),
        "puzzles must not show the numeric input: {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn summary_renders_score_and_best() {
    let mut harness = setup_view_harness(3, 40);
    harness.rebuild();
    harness
        .game
        .start_game(TopicSet::from_topics([Topic::Mul]))
        .unwrap();
    harness.drive_async().await;
    harness.game.show_summary().await.unwrap();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Run over"), "missing heading in {html}");
    assert!(html.contains("Play again"), "missing play again in {html}");
    assert!(html.contains("40"), "missing best score in {html}");
}
