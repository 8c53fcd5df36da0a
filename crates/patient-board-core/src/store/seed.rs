//! Demonstration data loaded at startup.

use chrono::NaiveDate;
use tracing::info;

use super::RecordStore;
use crate::models::{PatientRecord, Pendiente};

impl RecordStore {
    /// Load the sample patient shown on a fresh board.
    pub fn seed_sample_data(&mut self) {
        for record in sample_records() {
            self.insert(record);
        }
        info!(records = self.len(), "sample data loaded");
    }
}

fn sample_records() -> Vec<PatientRecord> {
    let admitted = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap_or_default();
    let mut record = PatientRecord::blank(0, admitted);
    record.names = "Juan Carlos Pérez Rodríguez".into();
    record.age = "45".into();
    record.ci = "12345678".into();
    record.nh = "NH-2024-001".into();
    record.phone = "0412-1234567".into();
    record.diagnosis = "Apendicitis aguda".into();
    record.plan = "Apendicectomía laparoscópica".into();
    record.pendientes = vec![
        Pendiente {
            text: "Realizar exámenes de laboratorio".into(),
            completed: true,
        },
        Pendiente::new("Valoración preanestésica"),
    ];
    record.specialist = "Dr. López".into();
    record.comment = "Paciente alérgico a penicilina".into();
    vec![record]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_sample_data() {
        let mut store = RecordStore::new();
        store.seed_sample_data();

        assert_eq!(store.len(), 1);
        let record = store.get(1).unwrap();
        assert_eq!(record.iea, "2024-01-15");
        assert_eq!(record.pendientes.len(), 2);
        assert!(record.pendientes[0].completed);
        assert!(!record.pendientes[1].completed);
        assert_eq!(store.next_id(), 2);
    }
}
