//! Табель посещаемости одного занятия на одну дату: слияние списочного
//! состава класса с уже сохранёнными записями, локальное редактирование
//! статусов и разбиение на создание/обновление при отправке.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::api::types::{AttendanceRecord, AttendanceStatus, NewAttendance, RosterEntry, ScheduleRecord};

/// Ссылка на занятие. Старые ответы бэкенда называют идентификатор
/// занятия по-разному, поэтому поле логически одно, а физически три;
/// порядок разрешения фиксированный.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ScheduleRef {
    #[serde(default)]
    pub original_schedule_id: Option<i64>,
    #[serde(default)]
    pub schedule_id: Option<i64>,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub class_id: Option<i64>,
}

impl ScheduleRef {
    /// Числовой идентификатор занятия: `original_schedule_id`, затем
    /// `schedule_id`, затем `id`. `None` — ссылка неразрешима.
    pub fn occurrence_id(&self) -> Option<i64> {
        self.original_schedule_id.or(self.schedule_id).or(self.id)
    }
}

impl From<&ScheduleRecord> for ScheduleRef {
    fn from(record: &ScheduleRecord) -> Self {
        ScheduleRef {
            original_schedule_id: record.original_schedule_id,
            schedule_id: record.schedule_id,
            id: Some(record.id),
            class_id: record.class_id,
        }
    }
}

/// Локальное редактируемое состояние одного студента. Живёт только пока
/// открыто модальное окно; `attendance_id == None` означает, что записи
/// ещё нет и отправка должна её создать.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendanceDraft {
    pub status: Option<AttendanceStatus>,
    pub checkin_time: Option<String>,
    pub attendance_id: Option<i64>,
}

/// Обновление существующей записи, уходящее на эндпоинт поздней отметки.
#[derive(Debug, Clone, PartialEq)]
pub struct LateEditDraft {
    pub student_id: i64,
    pub attendance_id: i64,
    pub checkin_time: Option<String>,
}

/// Табель: список студентов плюс карта черновиков по их ID.
/// Владеет черновиками единолично; сохранённые записи не мутирует,
/// после отправки карта перестраивается из ответа сервера.
#[derive(Debug, Clone)]
pub struct AttendanceSheet {
    pub date: NaiveDate,
    roster: Vec<RosterEntry>,
    drafts: HashMap<i64, AttendanceDraft>,
}

impl AttendanceSheet {
    /// Внешнее соединение состава класса с записями по `student_id`.
    /// Записи за другие даты отбрасываются здесь: бэкенд отдаёт всю
    /// посещаемость занятия, а не только целевой день.
    pub fn build(roster: Vec<RosterEntry>, records: &[AttendanceRecord], date: NaiveDate) -> Self {
        let mut drafts = HashMap::with_capacity(roster.len());
        for student in &roster {
            let existing = records
                .iter()
                .find(|r| r.student_id == student.student_id && r.date == date);
            let draft = match existing {
                Some(record) => AttendanceDraft {
                    status: record.status,
                    checkin_time: record.checkin_time.clone(),
                    attendance_id: record.attendance_id,
                },
                None => AttendanceDraft::default(),
            };
            drafts.insert(student.student_id, draft);
        }
        Self { date, roster, drafts }
    }

    pub fn roster(&self) -> &[RosterEntry] {
        &self.roster
    }

    pub fn draft(&self, student_id: i64) -> Option<&AttendanceDraft> {
        self.drafts.get(&student_id)
    }

    /// Заменяет черновик студента, сохраняя его `attendance_id`.
    /// Черновики остальных студентов не затрагиваются.
    pub fn set_status(
        &mut self,
        student_id: i64,
        status: Option<AttendanceStatus>,
        checkin_time: Option<String>,
    ) {
        let entry = self.drafts.entry(student_id).or_default();
        entry.status = status;
        entry.checkin_time = checkin_time;
    }

    /// Все студенты становятся отсутствующими, время прихода очищается.
    /// Повторный вызов ничего не меняет.
    pub fn mark_all_absent(&mut self) {
        for student in &self.roster {
            let entry = self.drafts.entry(student.student_id).or_default();
            entry.status = Some(AttendanceStatus::Absent);
            entry.checkin_time = None;
        }
    }

    /// Единственное условие допуска к отправке: состав непуст и у каждого
    /// студента выставлен статус. Пересчитывается на каждом изменении.
    pub fn is_ready(&self) -> bool {
        !self.roster.is_empty()
            && self.roster.iter().all(|s| {
                self.drafts
                    .get(&s.student_id)
                    .is_some_and(|d| d.status.is_some())
            })
    }

    /// Разбивает черновики с выставленным статусом на создаваемые и
    /// обновляемые по наличию `attendance_id`. Для обновлений время
    /// прихода считается равным `now` для присутствующих и очищается
    /// для остальных — так ведёт себя путь поздней отметки.
    pub fn partition(&self, now: &str) -> (Vec<NewAttendance>, Vec<LateEditDraft>) {
        let mut to_create = Vec::new();
        let mut to_update = Vec::new();
        for student in &self.roster {
            let Some(draft) = self.drafts.get(&student.student_id) else {
                continue;
            };
            let Some(status) = draft.status else {
                continue;
            };
            match draft.attendance_id {
                None => to_create.push(NewAttendance {
                    student_id: student.student_id,
                    status,
                    checkin_time: draft.checkin_time.clone(),
                }),
                Some(attendance_id) => to_update.push(LateEditDraft {
                    student_id: student.student_id,
                    attendance_id,
                    checkin_time: match status {
                        AttendanceStatus::Present => Some(now.to_string()),
                        AttendanceStatus::Absent => None,
                    },
                }),
            }
        }
        (to_create, to_update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(id: i64) -> RosterEntry {
        RosterEntry {
            student_id: id,
            name: format!("Студент {id}"),
            email: None,
            dob: None,
            phone: None,
            gender: None,
        }
    }

    fn record(
        attendance_id: i64,
        student_id: i64,
        status: Option<AttendanceStatus>,
        date: NaiveDate,
    ) -> AttendanceRecord {
        AttendanceRecord {
            attendance_id: Some(attendance_id),
            student_id,
            status,
            checkin_time: None,
            date,
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, d).unwrap()
    }

    #[test]
    fn occurrence_id_fallback_order() {
        let mut sref = ScheduleRef {
            original_schedule_id: Some(1),
            schedule_id: Some(2),
            id: Some(3),
            class_id: None,
        };
        assert_eq!(sref.occurrence_id(), Some(1));
        sref.original_schedule_id = None;
        assert_eq!(sref.occurrence_id(), Some(2));
        sref.schedule_id = None;
        assert_eq!(sref.occurrence_id(), Some(3));
        sref.id = None;
        assert_eq!(sref.occurrence_id(), None);
    }

    // Сценарий A: два студента, записей нет — пустые черновики, не готов.
    #[test]
    fn empty_records_seed_empty_drafts() {
        let sheet = AttendanceSheet::build(vec![student(1), student(2)], &[], day(1));
        for id in [1, 2] {
            let draft = sheet.draft(id).unwrap();
            assert_eq!(draft.status, None);
            assert_eq!(draft.checkin_time, None);
            assert_eq!(draft.attendance_id, None);
        }
        assert!(!sheet.is_ready());
    }

    // Сценарий B: после отметки всех — готов, отправка одним батчем.
    #[test]
    fn all_new_statuses_go_to_one_batch() {
        let mut sheet = AttendanceSheet::build(vec![student(1), student(2)], &[], day(1));
        sheet.set_status(1, Some(AttendanceStatus::Present), None);
        assert!(!sheet.is_ready());
        sheet.set_status(2, Some(AttendanceStatus::Absent), None);
        assert!(sheet.is_ready());

        let (to_create, to_update) = sheet.partition("2025-09-01 08:00:00");
        assert_eq!(to_create.len(), 2);
        assert!(to_update.is_empty());
        assert_eq!(to_create[0].student_id, 1);
        assert_eq!(to_create[0].status, AttendanceStatus::Present);
        assert_eq!(to_create[1].status, AttendanceStatus::Absent);
    }

    // Сценарий C: у одного студента запись уже есть — она уходит в
    // обновление, остальные в создание.
    #[test]
    fn existing_record_goes_to_update_path() {
        let records = vec![record(77, 1, Some(AttendanceStatus::Absent), day(1))];
        let mut sheet = AttendanceSheet::build(vec![student(1), student(2)], &records, day(1));

        let seeded = sheet.draft(1).unwrap();
        assert_eq!(seeded.attendance_id, Some(77));
        assert_eq!(seeded.status, Some(AttendanceStatus::Absent));
        assert_eq!(sheet.draft(2).unwrap().attendance_id, None);

        sheet.set_status(1, Some(AttendanceStatus::Present), None);
        sheet.set_status(2, Some(AttendanceStatus::Present), None);
        assert!(sheet.is_ready());

        let now = "2025-09-01 09:15:00";
        let (to_create, to_update) = sheet.partition(now);
        assert_eq!(to_create.len(), 1);
        assert_eq!(to_create[0].student_id, 2);
        assert_eq!(to_update.len(), 1);
        assert_eq!(to_update[0].student_id, 1);
        assert_eq!(to_update[0].attendance_id, 77);
        // присутствует — время прихода выставляется "сейчас"
        assert_eq!(to_update[0].checkin_time.as_deref(), Some(now));
    }

    #[test]
    fn late_edit_clears_checkin_for_absent() {
        let records = vec![record(5, 1, Some(AttendanceStatus::Present), day(2))];
        let mut sheet = AttendanceSheet::build(vec![student(1)], &records, day(2));
        sheet.set_status(1, Some(AttendanceStatus::Absent), None);
        let (_, to_update) = sheet.partition("2025-09-02 10:00:00");
        assert_eq!(to_update.len(), 1);
        assert_eq!(to_update[0].checkin_time, None);
    }

    // Сценарий E: записи за другую дату не попадают в черновики.
    #[test]
    fn records_for_other_dates_are_filtered_out() {
        let records = vec![
            record(10, 1, Some(AttendanceStatus::Present), day(3)),
            record(11, 2, Some(AttendanceStatus::Absent), day(3)),
        ];
        let sheet = AttendanceSheet::build(vec![student(1), student(2)], &records, day(4));
        assert_eq!(sheet.draft(1).unwrap(), &AttendanceDraft::default());
        assert_eq!(sheet.draft(2).unwrap(), &AttendanceDraft::default());
        assert!(!sheet.is_ready());
    }

    #[test]
    fn merge_yields_exactly_one_draft_per_student() {
        let records = vec![
            record(1, 1, Some(AttendanceStatus::Present), day(1)),
            // запись студента, которого нет в составе — в карту не попадает
            record(2, 99, Some(AttendanceStatus::Absent), day(1)),
        ];
        let sheet = AttendanceSheet::build(vec![student(1), student(2), student(3)], &records, day(1));
        assert_eq!(sheet.roster().len(), 3);
        assert!(sheet.draft(99).is_none());
        assert_eq!(sheet.draft(1).unwrap().attendance_id, Some(1));
    }

    #[test]
    fn partition_is_disjoint_and_covers_marked_drafts() {
        let records = vec![record(40, 2, Some(AttendanceStatus::Absent), day(1))];
        let mut sheet =
            AttendanceSheet::build(vec![student(1), student(2), student(3)], &records, day(1));
        sheet.set_status(1, Some(AttendanceStatus::Present), None);
        sheet.set_status(2, Some(AttendanceStatus::Present), None);
        // студент 3 остаётся без статуса — не попадает ни в одну часть

        let (to_create, to_update) = sheet.partition("2025-09-01 08:00:00");
        let created: Vec<i64> = to_create.iter().map(|r| r.student_id).collect();
        let updated: Vec<i64> = to_update.iter().map(|r| r.student_id).collect();
        assert_eq!(created, vec![1]);
        assert_eq!(updated, vec![2]);
        assert!(created.iter().all(|id| !updated.contains(id)));
    }

    #[test]
    fn readiness_drops_when_status_cleared() {
        let mut sheet = AttendanceSheet::build(vec![student(1), student(2)], &[], day(1));
        sheet.mark_all_absent();
        assert!(sheet.is_ready());
        sheet.set_status(2, None, None);
        assert!(!sheet.is_ready());
    }

    #[test]
    fn empty_roster_is_never_ready() {
        let mut sheet = AttendanceSheet::build(vec![], &[], day(1));
        sheet.mark_all_absent();
        assert!(!sheet.is_ready());
    }

    #[test]
    fn mark_all_absent_is_idempotent_and_keeps_ids() {
        let records = vec![record(7, 1, Some(AttendanceStatus::Present), day(1))];
        let mut sheet = AttendanceSheet::build(vec![student(1), student(2)], &records, day(1));
        sheet.mark_all_absent();
        let first: Vec<_> = [1, 2].iter().map(|id| sheet.draft(*id).unwrap().clone()).collect();
        sheet.mark_all_absent();
        let second: Vec<_> = [1, 2].iter().map(|id| sheet.draft(*id).unwrap().clone()).collect();
        assert_eq!(first, second);
        assert_eq!(sheet.draft(1).unwrap().attendance_id, Some(7));
        assert_eq!(sheet.draft(1).unwrap().status, Some(AttendanceStatus::Absent));
        assert_eq!(sheet.draft(1).unwrap().checkin_time, None);
    }

    #[test]
    fn set_status_creates_missing_draft() {
        let mut sheet = AttendanceSheet::build(vec![student(1)], &[], day(1));
        // студента 5 нет в составе, но явная отметка не должна падать
        sheet.set_status(5, Some(AttendanceStatus::Present), None);
        assert_eq!(sheet.draft(5).unwrap().status, Some(AttendanceStatus::Present));
        assert_eq!(sheet.draft(1).unwrap().status, None);
    }
}
