use super::*;

#[test]
fn test_unauthorized_submit_changes_nothing() -> Result<()> {
    let cop = coprocessor(10);
    let mut campus = Campus::open(&cop)?;

    let input = cop.encrypt_u32(50, &OTHER_TEACHER)?;
    assert!(matches!(
        campus.vault.submit_score(&OTHER_TEACHER, *STUDENT, &input),
        Err(EngineError::Unauthorized(_))
    ));
    assert!(!campus.vault.has_score(&STUDENT));
    assert_eq!(campus.vault.get_total_students_with_scores(), 0);
    assert!(campus.vault.events().is_empty());

    Ok(())
}

#[test]
fn test_submit_to_null_student_is_rejected() -> Result<()> {
    let cop = coprocessor(10);
    let mut campus = Campus::open(&cop)?;

    let input = cop.encrypt_u32(50, &TEACHER)?;
    assert!(matches!(
        campus.vault.submit_score(&TEACHER, Principal::NULL, &input),
        Err(EngineError::InvalidArgument(_))
    ));
    assert!(campus.vault.events().is_empty());

    Ok(())
}

#[test]
fn test_submit_then_update() -> Result<()> {
    let cop = coprocessor(11);
    let mut campus = Campus::open(&cop)?;
    campus.vault.authorize_teacher(&REGISTRAR, *OTHER_TEACHER)?;
    campus.vault.drain_events();

    assert!(!campus.vault.has_score(&STUDENT));

    campus.submit(&TEACHER, *STUDENT, 64)?;
    assert!(campus.vault.has_score(&STUDENT));
    assert_eq!(
        campus.vault.drain_events(),
        vec![EngineEvent::ScoreSubmitted { student: *STUDENT, teacher: *TEACHER }]
    );

    campus.submit(&OTHER_TEACHER, *STUDENT, 91)?;
    assert_eq!(
        campus.vault.drain_events(),
        vec![EngineEvent::ScoreUpdated { student: *STUDENT, teacher: *OTHER_TEACHER }]
    );

    assert_eq!(campus.decrypt_score(&STUDENT, &STUDENT)?, 91);
    assert_eq!(campus.vault.last_writer(&STUDENT), Some(*OTHER_TEACHER));
    assert_eq!(campus.vault.get_total_students_with_scores(), 1);

    Ok(())
}

#[test]
fn test_student_reads_own_score() -> Result<()> {
    let cop = coprocessor(12);
    let mut campus = Campus::open(&cop)?;

    campus.submit(&TEACHER, *STUDENT, 85)?;
    assert_eq!(campus.decrypt_score(&STUDENT, &STUDENT)?, 85);

    for outsider in [*OTHER_STUDENT, *SCHOOL, *REGISTRAR, *TEACHER] {
        assert!(matches!(
            campus.vault.get_student_score(&outsider, &STUDENT),
            Err(EngineError::Unauthorized(_))
        ));
    }

    assert!(matches!(
        campus.vault.get_student_score(&OTHER_STUDENT, &OTHER_STUDENT),
        Err(EngineError::NotFound(_))
    ));

    Ok(())
}

#[test]
fn test_total_counts_distinct_students() -> Result<()> {
    let cop = coprocessor(13);
    let mut campus = Campus::open(&cop)?;

    campus.submit(&TEACHER, *STUDENT, 40)?;
    campus.submit(&TEACHER, *STUDENT, 45)?;
    campus.submit(&TEACHER, *OTHER_STUDENT, 99)?;

    assert_eq!(campus.vault.get_total_students_with_scores(), 2);

    Ok(())
}

#[test]
fn test_input_bound_to_another_teacher_is_rejected() -> Result<()> {
    let cop = coprocessor(14);
    let mut campus = Campus::open(&cop)?;

    // Encrypted for someone else, replayed by an authorized teacher
    let input = cop.encrypt_u32(100, &OTHER_TEACHER)?;
    assert!(matches!(
        campus.vault.submit_score(&TEACHER, *STUDENT, &input),
        Err(EngineError::Coprocessor(CoprocessorError::InvalidInputProof))
    ));
    assert!(!campus.vault.has_score(&STUDENT));
    assert!(campus.vault.events().is_empty());

    Ok(())
}

#[test]
fn test_boolean_input_is_rejected() -> Result<()> {
    let cop = coprocessor(15);
    let mut campus = Campus::open(&cop)?;

    campus.submit(&TEACHER, *STUDENT, 80)?;
    let verdict = campus.vault.meets_admission_threshold(&TEACHER, &STUDENT, 50)?;
    assert_eq!(verdict.encrypted_type(), EncryptedType::Bool);
    campus.vault.drain_events();

    let mut input = cop.encrypt_u32(1, &TEACHER)?;
    input.handle = verdict;
    assert!(matches!(
        campus.vault.submit_score(&TEACHER, *OTHER_STUDENT, &input),
        Err(EngineError::InvalidArgument(_))
    ));
    assert!(!campus.vault.has_score(&OTHER_STUDENT));
    assert!(campus.vault.events().is_empty());

    Ok(())
}
