use jobbox::applications::{Applicant, ApplicantBoard, JobApplicants, StatusUpdateKey};
use jobbox::types::ApplicationStatus;

fn applicant(id: &str) -> Applicant {
    Applicant {
        student_id: id.to_string(),
        student: format!("Student {id}"),
        status: ApplicationStatus::Pending,
        applied_at: None,
        skills: vec![],
        education: vec![],
        resume: None,
        portfolio: None,
        phone_number: None,
    }
}

fn board() -> ApplicantBoard {
    ApplicantBoard::new(vec![
        JobApplicants {
            job_id: "jobA".to_string(),
            job_title: "Backend Engineer".to_string(),
            applicants: vec![applicant("app1"), applicant("app2")],
        },
        JobApplicants {
            job_id: "jobB".to_string(),
            job_title: "Frontend Dev".to_string(),
            applicants: vec![applicant("app1")],
        },
    ])
}

#[test]
fn successful_update_replaces_exactly_one_status() {
    let mut board = board();
    let key = StatusUpdateKey::new("jobA", "app1");

    assert!(board.begin_update(key.clone()));
    board.complete_update(&key, Some(ApplicationStatus::Accepted));

    assert_eq!(board.status_of(&key), Some(ApplicationStatus::Accepted));
    // The same student's application to a different job is untouched.
    assert_eq!(
        board.status_of(&StatusUpdateKey::new("jobB", "app1")),
        Some(ApplicationStatus::Pending)
    );
    // Another applicant on the same job is untouched.
    assert_eq!(
        board.status_of(&StatusUpdateKey::new("jobA", "app2")),
        Some(ApplicationStatus::Pending)
    );
}

#[test]
fn sequential_updates_to_different_pairs_are_independent() {
    let mut board = board();
    let first = StatusUpdateKey::new("jobA", "app1");
    let second = StatusUpdateKey::new("jobA", "app2");

    assert!(board.begin_update(first.clone()));
    board.complete_update(&first, Some(ApplicationStatus::Accepted));
    assert!(board.begin_update(second.clone()));
    board.complete_update(&second, Some(ApplicationStatus::Rejected));

    assert_eq!(board.status_of(&first), Some(ApplicationStatus::Accepted));
    assert_eq!(board.status_of(&second), Some(ApplicationStatus::Rejected));
}

#[test]
fn second_begin_for_the_same_pair_is_a_no_op() {
    let mut board = board();
    let key = StatusUpdateKey::new("jobA", "app1");

    assert!(board.begin_update(key.clone()));
    assert!(!board.begin_update(key.clone()));

    // A different pair is not blocked by the outstanding one.
    assert!(board.begin_update(StatusUpdateKey::new("jobA", "app2")));
}

#[test]
fn failed_update_changes_nothing_but_clears_the_flag() {
    let mut board = board();
    let key = StatusUpdateKey::new("jobA", "app1");

    board.begin_update(key.clone());
    board.complete_update(&key, None);

    assert_eq!(board.status_of(&key), Some(ApplicationStatus::Pending));
    assert!(!board.is_update_in_flight(&key));
    // The control is usable again after the failure.
    assert!(board.begin_update(key));
}

#[test]
fn flag_clears_after_success_too() {
    let mut board = board();
    let key = StatusUpdateKey::new("jobA", "app1");

    board.begin_update(key.clone());
    board.complete_update(&key, Some(ApplicationStatus::Hired));

    assert!(!board.is_update_in_flight(&key));
}

#[test]
fn keys_with_awkward_ids_do_not_collide() {
    // "a-b" + "c" and "a" + "b-c" would collide under string
    // concatenation; the composite key keeps them distinct.
    let mut board = ApplicantBoard::new(vec![
        JobApplicants {
            job_id: "a-b".to_string(),
            job_title: "X".to_string(),
            applicants: vec![applicant("c")],
        },
        JobApplicants {
            job_id: "a".to_string(),
            job_title: "Y".to_string(),
            applicants: vec![applicant("b-c")],
        },
    ]);

    let first = StatusUpdateKey::new("a-b", "c");
    let second = StatusUpdateKey::new("a", "b-c");
    assert_ne!(first, second);

    assert!(board.begin_update(first.clone()));
    assert!(board.begin_update(second.clone()));
    board.complete_update(&first, Some(ApplicationStatus::Accepted));
    board.complete_update(&second, None);

    assert_eq!(board.status_of(&first), Some(ApplicationStatus::Accepted));
    assert_eq!(board.status_of(&second), Some(ApplicationStatus::Pending));
}

#[test]
fn listing_wire_format_decodes() {
    let json = r#"[
        {
            "jobid": "65a1",
            "jobTitle": "Backend Engineer",
            "applicants": [
                {"studentid": "s1", "student": "Asha", "status": "accepted"},
                {"studentid": "s2", "student": "Ravi"}
            ]
        }
    ]"#;
    let listing: Vec<JobApplicants> = serde_json::from_str(json).unwrap();
    assert_eq!(listing[0].job_id, "65a1");
    assert_eq!(listing[0].applicants[0].status, ApplicationStatus::Accepted);
    // Status missing on the wire reads as pending.
    assert_eq!(listing[0].applicants[1].status, ApplicationStatus::Pending);
}
