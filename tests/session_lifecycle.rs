//! Integration tests for the session lifecycle and reviews.
//!
//! Covers status transition enforcement, price immutability across
//! mentor rate changes, and the complete-review-recompute flow.

use std::sync::Arc;

use chrono::{TimeZone, Utc};

use mentor_desk::adapters::memory::{
    InMemoryAvailabilityRepository, InMemoryMentorProfileRepository, InMemoryReviewRepository,
    InMemorySessionRepository,
};
use mentor_desk::application::handlers::booking::{BookSessionCommand, BookSessionHandler};
use mentor_desk::application::handlers::lifecycle::{
    CreateReviewCommand, CreateReviewHandler, UpdateSessionStatusCommand,
    UpdateSessionStatusHandler,
};
use mentor_desk::application::handlers::scheduling::SlotConflictResolver;
use mentor_desk::domain::foundation::{
    Actor, AvailabilityId, Money, SessionId, Timestamp, UserId, UserRole,
};
use mentor_desk::domain::mentoring::{
    AvailabilityWindow, MentorProfile, MentoringError, SessionStatus, TimeOfDay,
};
use mentor_desk::ports::{
    AvailabilityRepository, MentorProfileRepository, SessionRepository,
};

struct Fixture {
    profiles: Arc<InMemoryMentorProfileRepository>,
    sessions: Arc<InMemorySessionRepository>,
    book: BookSessionHandler,
    update_status: UpdateSessionStatusHandler,
    create_review: CreateReviewHandler,
}

impl Fixture {
    async fn new() -> Self {
        let availability = Arc::new(InMemoryAvailabilityRepository::new());
        let profiles = Arc::new(InMemoryMentorProfileRepository::new());
        let sessions = Arc::new(InMemorySessionRepository::new(profiles.clone()));
        let reviews = Arc::new(InMemoryReviewRepository::new(sessions.clone()));

        let profile = MentorProfile::new(
            mentor(),
            None,
            vec![],
            Money::from_cents(10_000).unwrap(),
            5,
            30,
            120,
        )
        .unwrap();
        profiles.save(&profile).await.unwrap();

        // Mondays, all day.
        let window = AvailabilityWindow::new(
            AvailabilityId::new(),
            mentor(),
            0,
            TimeOfDay::parse("08:00").unwrap(),
            TimeOfDay::parse("20:00").unwrap(),
        )
        .unwrap();
        availability.save(&window).await.unwrap();

        let resolver = Arc::new(SlotConflictResolver::new(
            availability.clone() as Arc<dyn AvailabilityRepository>,
            sessions.clone() as Arc<dyn SessionRepository>,
        ));
        let book = BookSessionHandler::new(
            profiles.clone() as Arc<dyn MentorProfileRepository>,
            sessions.clone() as Arc<dyn SessionRepository>,
            resolver,
        );
        let update_status = UpdateSessionStatusHandler::new(sessions.clone());
        let create_review =
            CreateReviewHandler::new(sessions.clone(), reviews.clone(), profiles.clone());

        Self {
            profiles,
            sessions,
            book,
            update_status,
            create_review,
        }
    }

    /// Books a session at the given Monday hour.
    async fn booked(&self, hour: u32) -> SessionId {
        let result = self
            .book
            .handle(BookSessionCommand {
                student_id: student(),
                mentor_id: mentor(),
                title: "Lifetime vs ownership".to_string(),
                description: None,
                scheduled_at: Timestamp::from_datetime(
                    Utc.with_ymd_and_hms(2026, 1, 5, hour, 0, 0).unwrap(),
                ),
                duration_minutes: 60,
            })
            .await
            .unwrap();
        result.session.id
    }

    /// Books and pays, landing the session in Confirmed.
    async fn confirmed(&self, hour: u32) -> SessionId {
        let id = self.booked(hour).await;
        self.sessions.confirm_payment(&id, "pi_1").await.unwrap();
        id
    }

    /// Books, pays, and completes the session.
    async fn completed(&self, hour: u32) -> SessionId {
        let id = self.confirmed(hour).await;
        self.update_status
            .handle(UpdateSessionStatusCommand {
                actor: mentor_actor(),
                session_id: id,
                target: SessionStatus::Completed,
            })
            .await
            .unwrap();
        id
    }
}

fn mentor() -> UserId {
    UserId::new("mentor-1").unwrap()
}

fn student() -> UserId {
    UserId::new("student-1").unwrap()
}

fn mentor_actor() -> Actor {
    Actor::new(mentor(), UserRole::Mentor)
}

fn student_actor() -> Actor {
    Actor::new(student(), UserRole::Student)
}

// ═══════════════════════════════════════════════════════════════════════════
// Price immutability
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn rate_change_after_booking_leaves_price_untouched() {
    let fx = Fixture::new().await;
    let id = fx.booked(10).await;

    let mut profile = fx.profiles.find_by_user_id(&mentor()).await.unwrap().unwrap();
    profile.hourly_rate = Money::from_cents(25_000).unwrap();
    fx.profiles.update(&profile).await.unwrap();

    let session = fx.sessions.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(session.price.cents(), 10_000);

    // New bookings pick up the new rate.
    let next = fx.booked(12).await;
    let session = fx.sessions.find_by_id(&next).await.unwrap().unwrap();
    assert_eq!(session.price.cents(), 25_000);
}

// ═══════════════════════════════════════════════════════════════════════════
// Status transitions
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn confirmed_is_never_a_manual_target() {
    let fx = Fixture::new().await;
    let id = fx.booked(10).await;

    let err = fx
        .update_status
        .handle(UpdateSessionStatusCommand {
            actor: mentor_actor(),
            session_id: id,
            target: SessionStatus::Confirmed,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, MentoringError::InvalidState { .. }));
}

#[tokio::test]
async fn only_the_sessions_mentor_or_admin_may_change_status() {
    let fx = Fixture::new().await;
    let id = fx.confirmed(10).await;

    let err = fx
        .update_status
        .handle(UpdateSessionStatusCommand {
            actor: student_actor(),
            session_id: id,
            target: SessionStatus::Completed,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, MentoringError::NotAuthorized));

    let admin = Actor::new(UserId::new("ops-1").unwrap(), UserRole::Admin);
    fx.update_status
        .handle(UpdateSessionStatusCommand {
            actor: admin,
            session_id: id,
            target: SessionStatus::Completed,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn completed_is_terminal() {
    let fx = Fixture::new().await;
    let id = fx.completed(10).await;

    let err = fx
        .update_status
        .handle(UpdateSessionStatusCommand {
            actor: mentor_actor(),
            session_id: id,
            target: SessionStatus::Cancelled,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, MentoringError::InvalidState { .. }));
}

// ═══════════════════════════════════════════════════════════════════════════
// Scenario: complete, review, recompute, reject duplicate
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn student_review_recomputes_mentor_average() {
    let fx = Fixture::new().await;
    let id = fx.completed(10).await;

    let result = fx
        .create_review
        .handle(CreateReviewCommand {
            actor: student_actor(),
            session_id: id,
            rating: 4,
            comment: Some("Cleared up my confusion".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(result.review.rating.value(), 4);
    assert_eq!(result.new_average_rating, Some(4.0));

    let profile = fx.profiles.find_by_user_id(&mentor()).await.unwrap().unwrap();
    assert_eq!(profile.average_rating, 4.0);

    // A second completed session, rated differently, moves the mean.
    let next = fx.completed(14).await;
    let result = fx
        .create_review
        .handle(CreateReviewCommand {
            actor: student_actor(),
            session_id: next,
            rating: 5,
            comment: None,
        })
        .await
        .unwrap();
    assert_eq!(result.new_average_rating, Some(4.5));
}

#[tokio::test]
async fn mentor_review_does_not_touch_the_average() {
    let fx = Fixture::new().await;
    let id = fx.completed(10).await;

    let result = fx
        .create_review
        .handle(CreateReviewCommand {
            actor: mentor_actor(),
            session_id: id,
            rating: 5,
            comment: None,
        })
        .await
        .unwrap();
    assert_eq!(result.new_average_rating, None);

    let profile = fx.profiles.find_by_user_id(&mentor()).await.unwrap().unwrap();
    assert_eq!(profile.average_rating, 0.0);
}

#[tokio::test]
async fn duplicate_review_is_rejected() {
    let fx = Fixture::new().await;
    let id = fx.completed(10).await;

    fx.create_review
        .handle(CreateReviewCommand {
            actor: student_actor(),
            session_id: id,
            rating: 5,
            comment: None,
        })
        .await
        .unwrap();

    let err = fx
        .create_review
        .handle(CreateReviewCommand {
            actor: student_actor(),
            session_id: id,
            rating: 1,
            comment: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, MentoringError::AlreadyReviewed(_)));

    // Both participants may review independently.
    fx.create_review
        .handle(CreateReviewCommand {
            actor: mentor_actor(),
            session_id: id,
            rating: 4,
            comment: None,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn review_requires_completion_and_participation() {
    let fx = Fixture::new().await;
    let id = fx.confirmed(10).await;

    let err = fx
        .create_review
        .handle(CreateReviewCommand {
            actor: student_actor(),
            session_id: id,
            rating: 5,
            comment: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, MentoringError::ReviewNotAllowed { .. }));

    fx.update_status
        .handle(UpdateSessionStatusCommand {
            actor: mentor_actor(),
            session_id: id,
            target: SessionStatus::Completed,
        })
        .await
        .unwrap();

    let outsider = Actor::new(UserId::new("stranger").unwrap(), UserRole::Student);
    let err = fx
        .create_review
        .handle(CreateReviewCommand {
            actor: outsider,
            session_id: id,
            rating: 5,
            comment: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, MentoringError::NotAuthorized));
}
