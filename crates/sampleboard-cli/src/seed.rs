//! Demo roster and requests preloaded by the CLI

use sampleboard_core::{
    BoardConfig, BoardError, BoardService, IntakeForm, Priority, RequestId, SpecialistConfig,
    SpecialistId,
};

/// Demo configuration: three specialists, one carrying outside workload
#[must_use]
pub fn demo_config() -> BoardConfig {
    let entry = |id: &str, name: &str, phone: &str, specialty: &str, active_tasks: u32| {
        SpecialistConfig {
            id: SpecialistId::new(id),
            name: name.to_string(),
            phone: phone.to_string(),
            specialty: specialty.to_string(),
            active_tasks,
        }
    };
    BoardConfig::new()
        .with_specialist(entry("s1", "Dr. Sara Al-Mansour", "0501234567", "Laboratory tests", 0))
        .with_specialist(entry(
            "s2",
            "Mohammed Al-Otaibi",
            "0507654321",
            "Sample-collection nursing",
            2,
        ))
        .with_specialist(entry("s3", "Dr. Hind Al-Qahtani", "0559876543", "Lab technician", 0))
}

/// Demo intake forms
#[must_use]
pub fn demo_forms() -> Vec<IntakeForm> {
    vec![
        IntakeForm::new(
            "Fahad Al-Rashidi",
            "0550001112",
            "Riyadh - Al Yasmin - Al Yaqout St",
            "Complete blood count",
        )
        .with_priority(Priority::High),
        IntakeForm::new(
            "Noura Al-Sulaiman",
            "0559998887",
            "Riyadh - Al Malqa - Rafal Tower",
            "Nasal swab",
        )
        .with_priority(Priority::Medium),
    ]
}

/// Submit the demo requests; the second one goes to `s1` when present
///
/// # Errors
/// Propagates intake and board errors as `anyhow` errors.
pub fn seed_demo_requests(service: &mut BoardService) -> anyhow::Result<Vec<RequestId>> {
    let mut ids = Vec::new();
    for form in demo_forms() {
        ids.push(service.submit_form(form)?);
    }
    let s1 = SpecialistId::new("s1");
    if let Some(second) = ids.get(1) {
        match service.assign(*second, &s1) {
            Ok(()) | Err(BoardError::SpecialistNotFound(_)) => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(ids)
}
