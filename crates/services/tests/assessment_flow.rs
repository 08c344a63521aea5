//! End-to-end learner flow over the wired service bundle: watch every
//! lesson, sit the assessment, earn (or miss) the completion.

use learnhub_core::model::UserId;
use learnhub_core::time::fixed_clock;
use services::sample::sample_catalog;
use services::AppServices;

fn app() -> AppServices {
    AppServices::in_memory_with_clock(sample_catalog().unwrap(), fixed_clock()).unwrap()
}

#[tokio::test]
async fn watch_then_pass_then_complete() {
    let app = app();
    let user = UserId::new("learner-1");
    let course = app.catalog.courses()[0].clone();

    // Watch the whole course in order; each lesson unlocks the next.
    for (index, lesson) in course.lessons().iter().enumerate() {
        assert!(app
            .progress
            .is_lesson_unlocked(&user, course.id(), index)
            .await
            .unwrap());
        app.progress
            .mark_lesson_complete(&user, course.id(), lesson.id())
            .await
            .unwrap();
    }
    assert_eq!(
        app.progress.progress_percent(&user, course.id()).await.unwrap(),
        100
    );
    assert!(app.progress.in_progress_courses(&user).await.unwrap().is_empty());

    // Sit the quiz and answer everything correctly.
    let mut attempt = app.assessments.start_attempt(course.id()).unwrap();
    let keys: Vec<usize> = attempt
        .questions()
        .iter()
        .map(|q| q.correct_index())
        .collect();
    for (i, key) in keys.into_iter().enumerate() {
        attempt.record_answer(i, key).unwrap();
    }
    let score = app
        .assessments
        .finish_attempt(&user, &mut attempt)
        .await
        .unwrap();
    assert!(score.passed);

    assert!(app
        .progress
        .is_course_completed(&user, course.id())
        .await
        .unwrap());
    let completed = app.progress.completed_courses(&user).await.unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].id(), course.id());
}

#[tokio::test]
async fn failing_the_quiz_keeps_lesson_progress() {
    let app = app();
    let user = UserId::new("learner-2");
    let course = app.catalog.courses()[1].clone();

    app.progress
        .mark_lesson_complete(&user, course.id(), course.lessons()[0].id())
        .await
        .unwrap();

    // Answer everything wrong.
    let mut attempt = app.assessments.start_attempt(course.id()).unwrap();
    let keys: Vec<usize> = attempt
        .questions()
        .iter()
        .map(|q| (q.correct_index() + 1) % 4)
        .collect();
    for (i, key) in keys.into_iter().enumerate() {
        attempt.record_answer(i, key).unwrap();
    }
    let score = app
        .assessments
        .finish_attempt(&user, &mut attempt)
        .await
        .unwrap();
    assert!(!score.passed);
    assert_eq!(score.correct, 0);

    assert!(!app
        .progress
        .is_course_completed(&user, course.id())
        .await
        .unwrap());
    // The course still shows up as in progress for another try.
    let started = app.progress.in_progress_courses(&user).await.unwrap();
    assert_eq!(started.len(), 1);
    assert_eq!(started[0].id(), course.id());
}

#[tokio::test]
async fn resume_point_survives_across_services() {
    let app = app();
    let user = UserId::new("learner-3");
    let course = app.catalog.courses()[2].clone();
    let third = course.lessons()[2].id().clone();

    app.progress
        .set_last_lesson(&user, course.id(), &third)
        .await
        .unwrap();
    assert_eq!(
        app.progress.last_lesson(&user, course.id()).await.unwrap(),
        Some(third)
    );
}
