//! Máquina de estados del ciclo de vida de averías
//!
//! El original manejaba estas reglas con hooks implícitos del ORM; aquí la
//! transición (estado viejo, estado nuevo) se clasifica de forma explícita
//! y el log acompañante se decide en funciones puras (`plan_*`), testeables
//! sin base de datos. Cada handler corre dentro de la MISMA transacción que
//! la escritura de la avería; la invalidación de cache ocurre después del
//! commit, en el controller.
//!
//! Transiciones con efecto sobre el status log del equipo:
//! - alta de avería            → log `breakdown` en start_time
//! - activa → repaired         → log `idle` si no queda otra avería activa
//! - repaired → activa         → log `breakdown` (reapertura)
//! - ongoing ↔ pending_parts   → sin log (ambas mapean a `breakdown`)
//! - borrado                   → log `idle` si no queda otra avería activa

use chrono::{DateTime, Utc};
use sqlx::{Postgres, Transaction};
use tracing::{info, warn};

use crate::models::breakdown::{BreakdownStatus, EquipmentBreakdown};
use crate::repositories::breakdown_repository::BreakdownRepository;
use crate::repositories::status_log_repository::{NewStatusLog, StatusLogRepository};
use crate::utils::errors::AppResult;

/// Clasificación de un cambio de estado de avería
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateTransition {
    /// De ongoing/pending_parts a repaired
    Repaired,
    /// De repaired de vuelta a ongoing/pending_parts
    Reopened,
    /// ongoing ↔ pending_parts o sin cambio: no toca el status log del
    /// equipo, pero el cache se invalida igual
    Shuffle,
}

/// Tabla de transiciones explícita sobre (estado viejo, estado nuevo)
pub fn classify_update(old_status: &str, new_status: &str) -> UpdateTransition {
    let old_active = BreakdownStatus::parse(old_status).map_or(false, |s| s.is_active());
    let new_active = BreakdownStatus::parse(new_status).map_or(false, |s| s.is_active());

    match (old_active, new_active) {
        (true, false) => UpdateTransition::Repaired,
        (false, true) => UpdateTransition::Reopened,
        _ => UpdateTransition::Shuffle,
    }
}

/// Minutos enteros entre start y end; se recalcula en cada save con ambos
/// timestamps presentes, antes de persistir
pub fn compute_duration_minutes(
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
) -> Option<i32> {
    end_time.map(|end| (end - start_time).num_minutes() as i32)
}

fn truncate_description(description: &str, max: usize) -> &str {
    match description.char_indices().nth(max) {
        Some((idx, _)) => &description[..idx],
        None => description,
    }
}

/// Log acompañante del alta: siempre `breakdown` en el start_time
pub fn plan_reported_log(breakdown: &EquipmentBreakdown) -> NewStatusLog {
    let notes = format!(
        "Breakdown: {} - {}",
        breakdown.breakdown_type,
        truncate_description(&breakdown.description, 100)
    );

    NewStatusLog::system_entry(
        breakdown.equipment_id,
        "breakdown",
        breakdown.loading_session_id,
        breakdown.start_time,
        notes,
    )
}

/// Log acompañante de un cambio de estado; `None` = sin side effect.
/// El `idle` de una reparación solo corresponde cuando no queda OTRA avería
/// activa para el equipo: mientras quede una, el estado derivado sigue
/// siendo `breakdown`.
pub fn plan_companion_log(
    transition: UpdateTransition,
    has_other_active: bool,
    breakdown: &EquipmentBreakdown,
    now: DateTime<Utc>,
) -> Option<NewStatusLog> {
    match transition {
        UpdateTransition::Repaired if !has_other_active => Some(NewStatusLog::system_entry(
            breakdown.equipment_id,
            "idle",
            breakdown.loading_session_id,
            breakdown.end_time.unwrap_or(now),
            format!(
                "Repaired from {} breakdown. Equipment ready for operation.",
                breakdown.breakdown_type
            ),
        )),
        UpdateTransition::Repaired => None,
        UpdateTransition::Reopened => Some(NewStatusLog::system_entry(
            breakdown.equipment_id,
            "breakdown",
            breakdown.loading_session_id,
            now,
            format!(
                "Breakdown status reverted to {}. Issue reopened.",
                breakdown.status
            ),
        )),
        UpdateTransition::Shuffle => None,
    }
}

/// Log acompañante de un borrado: `idle` solo si no queda otra activa
pub fn plan_removal_log(
    has_other_active: bool,
    equipment_id: i64,
    now: DateTime<Utc>,
) -> Option<NewStatusLog> {
    if has_other_active {
        return None;
    }

    Some(NewStatusLog::system_entry(
        equipment_id,
        "idle",
        None,
        now,
        "Breakdown record deleted. Equipment status reset to idle.".to_string(),
    ))
}

/// Alta de avería: log acompañante `breakdown` en el start_time
pub async fn on_reported(
    tx: &mut Transaction<'_, Postgres>,
    breakdown: &EquipmentBreakdown,
) -> AppResult<()> {
    StatusLogRepository::insert_with(&mut **tx, &plan_reported_log(breakdown)).await?;

    info!(
        equipment_id = breakdown.equipment_id,
        breakdown_id = breakdown.id,
        severity = %breakdown.severity,
        "Avería registrada, equipo marcado en breakdown"
    );

    Ok(())
}

/// Cambio de estado de avería: aplica la tabla de transiciones
pub async fn on_updated(
    tx: &mut Transaction<'_, Postgres>,
    old_status: &str,
    breakdown: &EquipmentBreakdown,
) -> AppResult<()> {
    let transition = classify_update(old_status, &breakdown.status);
    if transition == UpdateTransition::Shuffle {
        return Ok(());
    }

    let has_other_active = BreakdownRepository::has_active_with(
        &mut **tx,
        breakdown.equipment_id,
        Some(breakdown.id),
    )
    .await?;

    if let Some(entry) = plan_companion_log(transition, has_other_active, breakdown, Utc::now()) {
        StatusLogRepository::insert_with(&mut **tx, &entry).await?;
    }

    match transition {
        UpdateTransition::Repaired => info!(
            equipment_id = breakdown.equipment_id,
            breakdown_id = breakdown.id,
            has_other_active,
            "Avería reparada"
        ),
        UpdateTransition::Reopened => warn!(
            equipment_id = breakdown.equipment_id,
            breakdown_id = breakdown.id,
            new_status = %breakdown.status,
            "Avería reabierta"
        ),
        UpdateTransition::Shuffle => {}
    }

    Ok(())
}

/// Borrado de avería: restituir `idle` si no queda otra activa
pub async fn on_removed(
    tx: &mut Transaction<'_, Postgres>,
    breakdown: &EquipmentBreakdown,
) -> AppResult<()> {
    // La fila ya fue borrada dentro de esta transacción; la exclusión por id
    // es redundante pero inocua
    let has_other_active =
        BreakdownRepository::has_active_with(&mut **tx, breakdown.equipment_id, Some(breakdown.id))
            .await?;

    if let Some(entry) = plan_removal_log(has_other_active, breakdown.equipment_id, Utc::now()) {
        StatusLogRepository::insert_with(&mut **tx, &entry).await?;
    }

    info!(
        equipment_id = breakdown.equipment_id,
        breakdown_id = breakdown.id,
        has_other_active,
        "Avería eliminada"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal::Decimal;

    fn breakdown_with(status: &str, end_time: Option<DateTime<Utc>>) -> EquipmentBreakdown {
        let now = Utc::now();
        EquipmentBreakdown {
            id: 10,
            equipment_id: 3,
            loading_session_id: None,
            breakdown_type: "mechanical".to_string(),
            description: "Fallo en el sistema de frenos".to_string(),
            start_time: now - Duration::hours(4),
            end_time,
            duration_minutes: None,
            severity: "high".to_string(),
            repair_cost: Decimal::ZERO,
            repaired_by: None,
            status: status.to_string(),
            reported_by: 1,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_classify_repair() {
        assert_eq!(classify_update("ongoing", "repaired"), UpdateTransition::Repaired);
        assert_eq!(classify_update("pending_parts", "repaired"), UpdateTransition::Repaired);
    }

    #[test]
    fn test_classify_reopen() {
        assert_eq!(classify_update("repaired", "ongoing"), UpdateTransition::Reopened);
        assert_eq!(classify_update("repaired", "pending_parts"), UpdateTransition::Reopened);
    }

    #[test]
    fn test_classify_shuffle() {
        // ongoing ↔ pending_parts: ambos mapean a breakdown, sin side effect
        assert_eq!(classify_update("ongoing", "pending_parts"), UpdateTransition::Shuffle);
        assert_eq!(classify_update("pending_parts", "ongoing"), UpdateTransition::Shuffle);
        // sin cambio
        assert_eq!(classify_update("ongoing", "ongoing"), UpdateTransition::Shuffle);
        assert_eq!(classify_update("repaired", "repaired"), UpdateTransition::Shuffle);
    }

    #[test]
    fn test_reported_log_marks_breakdown_at_start_time() {
        let breakdown = breakdown_with("ongoing", None);
        let entry = plan_reported_log(&breakdown);

        assert_eq!(entry.equipment_id, 3);
        assert_eq!(entry.status, "breakdown");
        assert_eq!(entry.status_time, breakdown.start_time);
        assert!(entry.notes.as_deref().unwrap().starts_with("Breakdown: mechanical"));
    }

    #[test]
    fn test_repair_last_active_emits_idle_at_end_time() {
        let end = Utc::now() - Duration::hours(1);
        let breakdown = breakdown_with("repaired", Some(end));

        let entry = plan_companion_log(UpdateTransition::Repaired, false, &breakdown, Utc::now())
            .expect("repairing the last active breakdown must emit an idle log");

        assert_eq!(entry.equipment_id, 3);
        assert_eq!(entry.status, "idle");
        assert_eq!(entry.status_time, end);
    }

    #[test]
    fn test_repair_without_end_time_uses_now() {
        let breakdown = breakdown_with("repaired", None);
        let now = Utc::now();

        let entry = plan_companion_log(UpdateTransition::Repaired, false, &breakdown, now).unwrap();
        assert_eq!(entry.status_time, now);
    }

    #[test]
    fn test_repair_with_other_active_breakdown_emits_nothing() {
        // Dos averías activas: reparar una sola no devuelve el equipo a
        // idle, el estado derivado sigue en breakdown por la que queda
        let breakdown = breakdown_with("repaired", Some(Utc::now()));

        let entry = plan_companion_log(UpdateTransition::Repaired, true, &breakdown, Utc::now());
        assert!(entry.is_none());
    }

    #[test]
    fn test_reopen_emits_breakdown_log_regardless_of_others() {
        let breakdown = breakdown_with("ongoing", None);
        let now = Utc::now();

        for has_other_active in [false, true] {
            let entry =
                plan_companion_log(UpdateTransition::Reopened, has_other_active, &breakdown, now)
                    .expect("reopening must always emit a breakdown log");
            assert_eq!(entry.status, "breakdown");
            assert_eq!(entry.status_time, now);
            assert!(entry.notes.as_deref().unwrap().contains("reopened"));
        }
    }

    #[test]
    fn test_shuffle_emits_nothing() {
        let breakdown = breakdown_with("pending_parts", None);
        let now = Utc::now();

        assert!(plan_companion_log(UpdateTransition::Shuffle, false, &breakdown, now).is_none());
        assert!(plan_companion_log(UpdateTransition::Shuffle, true, &breakdown, now).is_none());
    }

    #[test]
    fn test_removal_resets_idle_only_when_last_active() {
        let now = Utc::now();

        let entry = plan_removal_log(false, 3, now).unwrap();
        assert_eq!(entry.status, "idle");
        assert_eq!(entry.status_time, now);

        assert!(plan_removal_log(true, 3, now).is_none());
    }

    #[test]
    fn test_report_then_repair_round_trip() {
        // Alta: log breakdown en start_time; reparación de la última activa:
        // log idle en end_time posterior
        let breakdown = breakdown_with("ongoing", None);
        let end = Utc::now();

        let reported = plan_reported_log(&breakdown);
        assert_eq!(reported.status, "breakdown");

        let repaired = EquipmentBreakdown {
            status: "repaired".to_string(),
            end_time: Some(end),
            ..breakdown
        };
        assert_eq!(
            classify_update("ongoing", &repaired.status),
            UpdateTransition::Repaired
        );

        let idle = plan_companion_log(UpdateTransition::Repaired, false, &repaired, end).unwrap();
        assert_eq!(idle.status, "idle");
        assert!(idle.status_time >= reported.status_time);
    }

    #[test]
    fn test_compute_duration_minutes() {
        let start = Utc::now();
        assert_eq!(compute_duration_minutes(start, None), None);
        assert_eq!(
            compute_duration_minutes(start, Some(start + Duration::minutes(90))),
            Some(90)
        );
        // Redondeo hacia abajo a minutos enteros
        assert_eq!(
            compute_duration_minutes(start, Some(start + Duration::seconds(119))),
            Some(1)
        );
        assert_eq!(compute_duration_minutes(start, Some(start)), Some(0));
    }

    #[test]
    fn test_truncate_description() {
        assert_eq!(truncate_description("short", 100), "short");
        let long = "x".repeat(150);
        assert_eq!(truncate_description(&long, 100).len(), 100);
    }
}
