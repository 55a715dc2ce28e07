//! Integration tests for the repositories against a migrated SQLite file.

use chrono::{Duration, NaiveDate, Utc};
use padikk_config::DatabaseConfig;
use padikk_database::{
    initialize_database, AlumniRepository, CatchUpRepository, ConnectionRepository,
    ConnectionStatus, CreatePlanRequest, CreatePlaybookRequest, CreateProfileRequest,
    CreateRecommendationRequest, CreateRoadmapRequest, CreateStudyLogRequest, DatabaseError,
    PlanStatus, PlaybookRepository, Priority, Profile, ProfileRepository, ProfileRole,
    ProjectRepository, ProjectRequest, PulseRepository, PulseStatus, PulseUpdate,
    StudyLogRepository, TechnologyInput, UpdateProfileRequest,
};
use sqlx::SqlitePool;
use tempfile::TempDir;

type TestResult<T = ()> = anyhow::Result<T>;

struct TestContext {
    pool: SqlitePool,
    profiles: ProfileRepository,
    _temp_dir: TempDir,
}

impl TestContext {
    async fn new() -> TestResult<Self> {
        let temp_dir = TempDir::new()?;
        let config = DatabaseConfig {
            url: format!("sqlite://{}", temp_dir.path().join("repos.db").display()),
            max_connections: 2,
        };
        let pool = initialize_database(&config).await?;
        Ok(Self {
            profiles: ProfileRepository::new(pool.clone()),
            pool,
            _temp_dir: temp_dir,
        })
    }

    async fn profile(&self, name: &str, role: ProfileRole, expertise: &[&str]) -> TestResult<Profile> {
        let now = Utc::now().to_rfc3339();
        let email = format!("{}@padikk.test", name.to_lowercase().replace(' ', "."));
        let (user_id,): (i64,) = sqlx::query_as(
            "INSERT INTO users (public_id, email, display_name, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(cuid2::create_id())
        .bind(&email)
        .bind(name)
        .bind(&now)
        .bind(&now)
        .fetch_one(&self.pool)
        .await?;

        let request = CreateProfileRequest {
            full_name: name.to_string(),
            role,
            college: "College of Engineering Trivandrum".to_string(),
            department: "Computer Science".to_string(),
            year: Some(2),
            bio: None,
            areas_of_expertise: expertise.iter().map(|s| s.to_string()).collect(),
        };
        Ok(self.profiles.create(user_id, Some(&email), &request).await?)
    }
}

#[tokio::test]
async fn completing_a_profile_twice_is_rejected() -> TestResult {
    let ctx = TestContext::new().await?;
    let student = ctx.profile("Anu Thomas", ProfileRole::Student, &[]).await?;

    let streak = ctx.profiles.streak(&student.id).await?.expect("streak row");
    assert_eq!(streak.current_streak, 0);

    let request = CreateProfileRequest {
        full_name: "Again".into(),
        role: ProfileRole::Student,
        college: "CET".into(),
        department: "CSE".into(),
        year: None,
        bio: None,
        areas_of_expertise: Vec::new(),
    };
    let error = ctx
        .profiles
        .create(student.user_id, None, &request)
        .await
        .expect_err("second completion should fail");
    assert!(matches!(error, DatabaseError::Duplicate(_)));
    Ok(())
}

#[tokio::test]
async fn profile_update_changes_only_given_fields() -> TestResult {
    let ctx = TestContext::new().await?;
    let student = ctx.profile("Anu Thomas", ProfileRole::Student, &["Python"]).await?;

    let updated = ctx
        .profiles
        .update(
            &student.id,
            &UpdateProfileRequest {
                bio: Some("Third semester CSE".into()),
                areas_of_expertise: Some(vec!["Python".into(), " Git ".into()]),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(updated.full_name, "Anu Thomas");
    assert_eq!(updated.bio.as_deref(), Some("Third semester CSE"));
    assert_eq!(updated.expertise(), ["Python".to_string(), "Git".to_string()]);

    let reloaded = ctx.profiles.find_by_id(&student.id).await?.expect("profile");
    assert_eq!(reloaded.expertise(), updated.expertise());
    Ok(())
}

#[tokio::test]
async fn mentor_search_filters_guides_only() -> TestResult {
    let ctx = TestContext::new().await?;
    ctx.profile("Anu Thomas", ProfileRole::Student, &["Machine Learning"]).await?;
    ctx.profile("Priya Nair", ProfileRole::Mentor, &["Machine Learning", "Python"]).await?;
    ctx.profile("Rahul Menon", ProfileRole::Alumni, &["Embedded Systems"]).await?;

    assert_eq!(ctx.profiles.search_guides("").await?.len(), 2);
    assert_eq!(ctx.profiles.count_guides().await?, 2);

    let matches = ctx.profiles.search_guides("machine").await?;
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].full_name, "Priya Nair");

    let matches = ctx.profiles.search_guides("EMBEDDED").await?;
    assert_eq!(matches[0].role, ProfileRole::Alumni);
    Ok(())
}

#[tokio::test]
async fn study_logs_advance_streak_and_likes_toggle() -> TestResult {
    let ctx = TestContext::new().await?;
    let student = ctx.profile("Anu Thomas", ProfileRole::Student, &[]).await?;
    let friend = ctx.profile("Devika S", ProfileRole::Student, &[]).await?;
    let logs = StudyLogRepository::new(ctx.pool.clone());

    let day_one = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
    let request = CreateStudyLogRequest {
        subject: "Data Structures".into(),
        duration_minutes: 90,
        notes: "Trees".into(),
    };

    let (first, streak) = logs.create(&student.id, &request, day_one).await?;
    assert_eq!(streak.current_streak, 1);
    let (_, streak) = logs.create(&student.id, &request, day_one).await?;
    assert_eq!(streak.current_streak, 1);
    let (_, streak) = logs.create(&student.id, &request, day_one + Duration::days(1)).await?;
    assert_eq!(streak.current_streak, 2);
    let (_, streak) = logs.create(&student.id, &request, day_one + Duration::days(5)).await?;
    assert_eq!(streak.current_streak, 1);
    assert_eq!(streak.longest_streak, 2);

    assert_eq!(logs.list_for_profile(&student.id).await?.len(), 4);
    assert_eq!(logs.count_on(day_one).await?, 2);

    let before = logs.like_count(&first.id).await?;
    let liked = logs.toggle_like(&first.id, &friend.id).await?;
    assert!(liked.liked);
    assert_eq!(liked.like_count, before + 1);
    let unliked = logs.toggle_like(&first.id, &friend.id).await?;
    assert!(!unliked.liked);
    assert_eq!(unliked.like_count, before);

    logs.toggle_like(&first.id, &friend.id).await?;
    let feed = logs.feed(&friend.id, 10).await?;
    let entry = feed.iter().find(|e| e.id == first.id).expect("feed entry");
    assert_eq!(entry.author_name, "Anu Thomas");
    assert_eq!(entry.like_count, 1);
    assert!(entry.liked_by_me);

    let missing = logs.toggle_like("missing", &friend.id).await;
    assert!(matches!(missing, Err(DatabaseError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn connections_fill_the_right_slot_and_track_status() -> TestResult {
    let ctx = TestContext::new().await?;
    let student = ctx.profile("Anu Thomas", ProfileRole::Student, &[]).await?;
    let mentor = ctx.profile("Priya Nair", ProfileRole::Mentor, &[]).await?;
    let alumni = ctx.profile("Rahul Menon", ProfileRole::Alumni, &[]).await?;
    let connections = ConnectionRepository::new(ctx.pool.clone());

    let message = "I am struggling with signals and systems and would love some guidance";
    let to_mentor = connections.create(&student.id, &mentor, message).await?;
    assert_eq!(to_mentor.mentor_id.as_deref(), Some(mentor.id.as_str()));
    assert_eq!(to_mentor.status, ConnectionStatus::Pending);
    assert_eq!(to_mentor.last_message.chars().count(), 53);

    let to_alumni = connections.create(&student.id, &alumni, "Placement tips?").await?;
    assert!(to_alumni.mentor_id.is_none());
    assert_eq!(to_alumni.alumni_id.as_deref(), Some(alumni.id.as_str()));

    let mine = connections.list_for_profile(&student.id).await?;
    assert_eq!(mine.len(), 2);
    assert_eq!(mine[0].counterpart_name, "Rahul Menon");

    let theirs = connections.list_for_profile(&mentor.id).await?;
    assert_eq!(theirs.len(), 1);
    assert_eq!(theirs[0].counterpart_name, "Anu Thomas");

    assert!(!connections.has_active_link(&mentor.id, &student.id).await?);
    connections.set_status(&to_mentor.id, ConnectionStatus::Active).await?;
    assert!(connections.has_active_link(&mentor.id, &student.id).await?);
    assert!(!connections.has_active_link(&alumni.id, &student.id).await?);

    let mentees = connections.active_mentees(&mentor.id).await?;
    assert_eq!(mentees.len(), 1);
    assert_eq!(mentees[0].profile_id, student.id);
    Ok(())
}

#[tokio::test]
async fn completing_every_task_reaches_full_progress() -> TestResult {
    let ctx = TestContext::new().await?;
    let student = ctx.profile("Anu Thomas", ProfileRole::Student, &[]).await?;
    let plans = CatchUpRepository::new(ctx.pool.clone());

    let plan = plans
        .create(
            &student.id,
            &CreatePlanRequest {
                subject: "Signals".into(),
                exam_date: NaiveDate::from_ymd_opt(2025, 4, 20).unwrap(),
                days: Some(3),
            },
        )
        .await?;
    assert_eq!(plan.total_tasks, 3);
    assert_eq!(plan.roadmap[2].title, "Day 3 Study Topic");
    assert_eq!(plans.count_in_progress().await?, 1);

    let plan = plans.add_task(&plan.id, "Previous year papers").await?;
    assert_eq!(plan.total_tasks, 4);
    assert_eq!(plan.roadmap[3].day, 4);

    let task_ids: Vec<String> = plan.roadmap.iter().map(|t| t.id.clone()).collect();
    let mut latest = plan;
    for id in &task_ids {
        latest = plans.toggle_task(&latest.id, id).await?;
        assert!(latest.progress <= 100);
    }
    assert_eq!(latest.completed_tasks, 4);
    assert_eq!(latest.progress, 100);
    assert_eq!(latest.status, PlanStatus::Completed);
    assert_eq!(plans.count_in_progress().await?, 0);

    let latest = plans.toggle_task(&latest.id, &task_ids[0]).await?;
    assert_eq!(latest.progress, 75);
    assert_eq!(latest.status, PlanStatus::InProgress);

    plans.delete(&latest.id).await?;
    assert!(plans.find_by_id(&latest.id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn interleaved_task_writes_keep_counters_in_sync() -> TestResult {
    let ctx = TestContext::new().await?;
    let student = ctx.profile("Anu Thomas", ProfileRole::Student, &[]).await?;
    let plans = CatchUpRepository::new(ctx.pool.clone());

    let plan = plans
        .create(
            &student.id,
            &CreatePlanRequest {
                subject: "Thermodynamics".into(),
                exam_date: NaiveDate::from_ymd_opt(2025, 4, 28).unwrap(),
                days: Some(4),
            },
        )
        .await?;
    let ids: Vec<String> = plan.roadmap.iter().map(|t| t.id.clone()).collect();

    let (a, b, c, d, e, f) = tokio::join!(
        plans.toggle_task(&plan.id, &ids[0]),
        plans.add_task(&plan.id, "Formula sheet"),
        plans.toggle_task(&plan.id, &ids[1]),
        plans.add_task(&plan.id, "Mock test"),
        plans.toggle_task(&plan.id, &ids[2]),
        plans.toggle_task(&plan.id, &ids[3]),
    );
    for result in [a, b, c, d, e, f] {
        result?;
    }

    let stored = plans
        .find_by_id(&plan.id)
        .await?
        .expect("plan still exists");
    let completed = stored.roadmap.iter().filter(|t| t.completed).count() as i64;

    assert_eq!(stored.roadmap.len(), 6);
    assert_eq!(stored.total_tasks, 6);
    assert_eq!(completed, 4);
    assert_eq!(stored.completed_tasks, 4);
    assert_eq!(stored.progress, 67);
    assert_eq!(stored.status, PlanStatus::InProgress);

    let mut days: Vec<i64> = stored.roadmap.iter().map(|t| t.day).collect();
    days.dedup();
    assert_eq!(days, vec![1, 2, 3, 4, 5, 6]);
    Ok(())
}

#[tokio::test]
async fn playbooks_duplicate_with_copy_suffix() -> TestResult {
    let ctx = TestContext::new().await?;
    let mentor = ctx.profile("Priya Nair", ProfileRole::Mentor, &[]).await?;
    let playbooks = PlaybookRepository::new(ctx.pool.clone());

    let original = playbooks
        .create(
            &mentor.id,
            &CreatePlaybookRequest {
                title: "Pomodoro for labs".into(),
                category: "Time Management".into(),
                guidance: "25 minutes on, 5 off.".into(),
            },
        )
        .await?;
    let copy = playbooks.duplicate(&original.id).await?;
    assert_eq!(copy.title, "Pomodoro for labs (Copy)");
    assert_eq!(copy.mentor_id, mentor.id);
    assert_ne!(copy.id, original.id);

    assert_eq!(playbooks.list_for_mentor(&mentor.id).await?.len(), 2);
    playbooks.delete(&original.id).await?;
    assert_eq!(playbooks.list_for_mentor(&mentor.id).await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn pulse_upsert_keeps_one_row_per_week() -> TestResult {
    let ctx = TestContext::new().await?;
    let mentor = ctx.profile("Priya Nair", ProfileRole::Mentor, &[]).await?;
    let student = ctx.profile("Anu Thomas", ProfileRole::Student, &[]).await?;
    let pulse = PulseRepository::new(ctx.pool.clone());
    let week = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();

    pulse
        .upsert(&mentor.id, &student.id, week, &PulseUpdate { status: PulseStatus::Concern, notes: None })
        .await?;
    pulse
        .upsert(
            &mentor.id,
            &student.id,
            week,
            &PulseUpdate { status: PulseStatus::Critical, notes: Some("Missed labs".into()) },
        )
        .await?;

    let rows = pulse.for_week(&mentor.id, week).await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, PulseStatus::Critical);
    assert_eq!(rows[0].notes.as_deref(), Some("Missed labs"));
    assert!(pulse.for_week(&mentor.id, week + Duration::days(7)).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn alumni_roadmaps_and_recommendations() -> TestResult {
    let ctx = TestContext::new().await?;
    let alumni = ctx.profile("Rahul Menon", ProfileRole::Alumni, &[]).await?;
    let student = ctx.profile("Anu Thomas", ProfileRole::Student, &[]).await?;
    let repo = AlumniRepository::new(ctx.pool.clone());

    for (year, title) in [(3, "Internship year"), (1, "Foundations"), (1, "Foundations v2")] {
        repo.create_roadmap(
            &alumni.id,
            &CreateRoadmapRequest {
                title: title.into(),
                description: String::new(),
                target_year: year,
                academic_focus: vec!["Maths".into()],
                skills_focus: vec!["Git".into(), "C".into()],
                key_learnings: String::new(),
            },
        )
        .await?;
    }

    let roadmaps = repo.list_roadmaps(&alumni.id).await?;
    let years: Vec<i64> = roadmaps.iter().map(|r| r.target_year).collect();
    assert_eq!(years, vec![1, 1, 3]);

    let latest = repo.latest_roadmap_for_year(&alumni.id, 1).await?.expect("roadmap");
    assert_eq!(latest.title, "Foundations v2");
    assert!(repo.latest_roadmap_for_year(&alumni.id, 2).await?.is_none());

    let recommendation = repo
        .create_recommendation(
            &alumni.id,
            &student.id,
            &CreateRecommendationRequest {
                skill_name: "Docker".into(),
                resource_url: String::new(),
                action_item: "Containerise the mini project".into(),
                priority: Priority::default(),
            },
        )
        .await?;
    assert_eq!(recommendation.priority, Priority::Medium);
    assert_eq!(repo.list_recommendations(&alumni.id, &student.id).await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn projects_store_trimmed_technologies() -> TestResult {
    let ctx = TestContext::new().await?;
    let student = ctx.profile("Anu Thomas", ProfileRole::Student, &[]).await?;
    let projects = ProjectRepository::new(ctx.pool.clone());

    let project = projects
        .create(
            &student.id,
            ProjectRequest {
                title: "Bus tracker".into(),
                description: "KSRTC live positions".into(),
                technologies: TechnologyInput::Csv("Rust, Axum, ,SQLite ".into()),
                project_url: Some("  ".into()),
                github_url: Some("https://github.com/anu/bus".into()),
            },
        )
        .await?;
    assert_eq!(project.technologies.0, vec!["Rust", "Axum", "SQLite"]);
    assert!(project.project_url.is_none());

    let updated = projects
        .update(
            &project.id,
            ProjectRequest {
                title: "Bus tracker v2".into(),
                description: "Now with ETAs".into(),
                technologies: TechnologyInput::List(vec!["Rust".into()]),
                project_url: None,
                github_url: None,
            },
        )
        .await?;
    assert_eq!(updated.title, "Bus tracker v2");
    assert_eq!(updated.created_at, project.created_at);

    let listed = projects.list_for_profile(&student.id).await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].technologies.0, vec!["Rust"]);

    projects.delete(&project.id).await?;
    assert!(matches!(
        projects.delete(&project.id).await,
        Err(DatabaseError::NotFound(_))
    ));
    Ok(())
}
