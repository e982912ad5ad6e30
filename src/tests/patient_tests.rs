use crate::core::errors::ClinicError;
use crate::core::models::patient::NewPatient;
use crate::tests::create_test_service;
use chrono::Utc;

fn new_patient(name: &str) -> NewPatient {
    NewPatient {
        name: name.to_string(),
        phone: "555-0100".to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        age: "42".to_string(),
        treatment: "Root canal".to_string(),
        infection: "Abscess".to_string(),
        allergy: "Penicillin".to_string(),
        medication: "Ibuprofen".to_string(),
        prescription: "400mg twice daily".to_string(),
        next_appointment: "2026-11-02".to_string(),
    }
}

#[tokio::test]
async fn test_add_patient_persists_all_fields() {
    let service = create_test_service().await;
    let before = Utc::now();
    let created = service.add_patient(new_patient("Mulder")).await.unwrap();
    let after = Utc::now();

    assert_eq!(created.name, "Mulder");
    assert_eq!(created.phone, "555-0100");
    assert_eq!(created.email, "mulder@example.com");
    assert_eq!(created.age, "42");
    assert_eq!(created.treatment, "Root canal");
    assert_eq!(created.infection, "Abscess");
    assert_eq!(created.allergy, "Penicillin");
    assert_eq!(created.medication, "Ibuprofen");
    assert_eq!(created.prescription, "400mg twice daily");
    assert_eq!(created.next_appointment, "2026-11-02");
    assert!(before <= created.date_treated && created.date_treated <= after);

    let fetched = service.get_patient(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_add_patient_requires_name_email_age() {
    let service = create_test_service().await;
    for field in ["name", "email", "age"] {
        let mut patient = new_patient("Skinner");
        match field {
            "name" => patient.name.clear(),
            "email" => patient.email.clear(),
            _ => patient.age.clear(),
        }
        let result = service.add_patient(patient).await;
        assert!(matches!(result, Err(ClinicError::InvalidInput(f, _)) if f == field));
    }

    let optional_only = NewPatient {
        name: "Skinner".to_string(),
        email: "skinner@example.com".to_string(),
        age: "55".to_string(),
        ..Default::default()
    };
    let created = service.add_patient(optional_only).await.unwrap();
    assert_eq!(created.phone, "");
    assert!(service.list_patients().await.unwrap().len() == 1);
}

#[tokio::test]
async fn test_list_patients_most_recent_first() {
    let service = create_test_service().await;
    let first = service.add_patient(new_patient("First")).await.unwrap();
    let second = service.add_patient(new_patient("Second")).await.unwrap();
    let third = service.add_patient(new_patient("Third")).await.unwrap();

    let ids: Vec<i64> = service.list_patients().await.unwrap().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);
}

#[tokio::test]
async fn test_delete_patient_removes_only_that_record() {
    let service = create_test_service().await;
    let keep = service.add_patient(new_patient("Keep")).await.unwrap();
    let remove = service.add_patient(new_patient("Remove")).await.unwrap();

    service.delete_patient(remove.id).await.unwrap();

    let remaining = service.list_patients().await.unwrap();
    assert_eq!(remaining, vec![keep]);
    assert!(matches!(
        service.get_patient(remove.id).await,
        Err(ClinicError::PatientNotFound(id)) if id == remove.id
    ));
    assert!(matches!(
        service.delete_patient(remove.id).await,
        Err(ClinicError::PatientNotFound(_))
    ));
}
