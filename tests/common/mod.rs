#![allow(dead_code)]

use doctofind::directory::{parse_directory, DirectorySnapshot};
use doctofind::models::{Practitioner, Speciality};
use doctofind::repository::PractitionerRepository;
use std::sync::Arc;

/// The two-record directory used in the worked examples.
pub fn example_directory() -> Vec<Practitioner> {
    let body = serde_json::json!([
        {
            "id": "a",
            "name": "Dr. A",
            "fees": "₹ 100",
            "experience": "5 Years of experience",
            "video_consult": true,
            "in_clinic": false,
            "specialities": [{ "name": "Cardiologist" }]
        },
        {
            "id": "b",
            "name": "Dr. B",
            "fees": "₹ 50",
            "experience": "10 Years of experience",
            "video_consult": false,
            "in_clinic": true,
            "specialities": [{ "name": "Dermatologist" }]
        }
    ]);
    parse_directory(body.to_string().as_bytes()).expect("example directory should decode")
}

/// A larger directory in the shape the public endpoint serves, including a few damaged
/// records.
pub fn test_directory_json() -> serde_json::Value {
    serde_json::json!([
        {
            "id": "111",
            "name": "Dr. Asha Rao",
            "photo": "https://example.org/asha.png",
            "specialities": [{ "name": "General Physician" }, { "name": "Dentist" }],
            "experience": "13 Years of experience",
            "languages": ["English", "Kannada"],
            "clinic": {
                "name": "Rao Family Clinic",
                "address": { "locality": "Jayanagar", "city": "Bangalore" }
            },
            "fees": "₹ 500",
            "video_consult": true,
            "in_clinic": true
        },
        {
            "id": "112",
            "name": "Dr. Vikram Shah",
            "specialities": [{ "name": "Dentist" }],
            "experience": "8 Years of experience",
            "fees": "₹ 300",
            "video_consult": false,
            "in_clinic": true
        },
        {
            "id": "113",
            "name": "Dr. Meera Iyer",
            "specialities": [{ "name": "Dermatologist" }],
            "experience": "21 Years of experience",
            "fees": "₹ 800",
            "video_consult": true,
            "in_clinic": false
        },
        {
            "name": "Dr. Raghav Rao",
            "specialities": [{ "name": "general physician" }],
            "experience": "8 Years of experience",
            "fees": "Free",
            "video_consult": true,
            "in_clinic": true
        },
        "not a record",
        {
            "id": 115,
            "name": "Dr. Nikhil Rao",
            "specialities": null,
            "fees": "₹ 300"
        }
    ])
}

pub fn test_directory() -> Vec<Practitioner> {
    parse_directory(test_directory_json().to_string().as_bytes())
        .expect("test directory should decode")
}

pub fn loaded_repo(practitioners: Vec<Practitioner>) -> Arc<PractitionerRepository> {
    Arc::new(PractitionerRepository::with_snapshot(DirectorySnapshot::loaded(
        "test", practitioners,
    )))
}

pub fn practitioner(name: &str, fees: &str, experience: &str, specs: &[&str]) -> Practitioner {
    Practitioner {
        name: name.to_string(),
        fees: fees.to_string(),
        experience: experience.to_string(),
        specialities: specs
            .iter()
            .map(|s| Speciality { name: s.to_string() })
            .collect(),
        ..Default::default()
    }
}
