use chrono::NaiveDate;
use iced::Task;
use iced_aw::date_picker::Date;
use regex::Regex;

use crate::api::ApiClient;
use crate::api::types::{
    AttendanceRecord, BatchCreateAttendance, ClassPayload, EvaluationPayload, LateEditAttendance,
    PayrollPayload, ReviewPayload, RosterEntry, SchedulePayload, TuitionPayload, UserPayload,
};
use crate::app::messages::Message;
use crate::app::state::{App, DatePickerOpen, Screen};
use crate::attendance::{AttendanceSheet, ScheduleRef};
use crate::config::save_theme;
use crate::money;
use crate::session::Session;

impl App {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            // --- Навигация и уведомления ---
            Message::Navigate(screen) => {
                self.current_screen = screen;
                self.error_message.clear();
                self.status_message.clear();
                match screen {
                    Screen::Users => self.load_users(),
                    Screen::Classes => Task::batch([self.load_classes(), self.load_users()]),
                    Screen::Schedules => Task::batch([self.load_schedules(), self.load_classes()]),
                    Screen::Tuition => Task::batch([
                        self.load_tuitions(),
                        self.load_users(),
                        self.load_classes(),
                    ]),
                    Screen::Payroll => Task::batch([self.load_payrolls(), self.load_users()]),
                    Screen::Reviews => Task::batch([self.load_reviews(), self.load_users()]),
                    Screen::Evaluations => Task::batch([
                        self.load_evaluations(),
                        self.load_users(),
                        self.load_classes(),
                    ]),
                    _ => Task::none(),
                }
            }
            Message::DismissNotice => {
                self.error_message.clear();
                self.status_message.clear();
                Task::none()
            }
            // --- Вход / выход ---
            Message::LoginEmailChanged(value) => {
                self.login_email = value;
                Task::none()
            }
            Message::LoginPasswordChanged(value) => {
                self.login_password = value;
                Task::none()
            }
            Message::SubmitLogin => {
                if self.login_in_progress {
                    return Task::none();
                }
                let email = self.login_email.trim().to_string();
                if !valid_email(&email) {
                    self.error_message = "Введите корректный e-mail".to_string();
                    return Task::none();
                }
                if self.login_password.is_empty() {
                    self.error_message = "Введите пароль".to_string();
                    return Task::none();
                }
                self.error_message.clear();
                self.login_in_progress = true;
                let api = self.api.clone();
                let password = self.login_password.clone();
                Task::perform(
                    async move { api.login(&email, &password).await.map_err(|e| e.to_string()) },
                    Message::LoginFinished,
                )
            }
            Message::LoginFinished(Ok(response)) => {
                self.login_in_progress = false;
                self.api.set_token(Some(response.token.clone()));
                let session = Session {
                    token: response.token,
                    user: response.user,
                };
                if let Err(e) = session.save() {
                    log::warn!("не удалось сохранить сессию: {e}");
                }
                self.session = Some(session);
                self.login_password.clear();
                self.current_screen = Screen::Profile;
                Task::none()
            }
            Message::LoginFinished(Err(e)) => {
                self.login_in_progress = false;
                self.error_message = e;
                Task::none()
            }
            Message::Logout => {
                Session::clear();
                // тема переживает выход: она уже лежит в конфиге
                *self = App::default();
                Task::none()
            }
            // --- Настройки ---
            Message::ThemeSelected(theme) => {
                self.theme = theme;
                if let Err(e) = save_theme(&self.theme) {
                    log::warn!("не удалось сохранить тему: {e}");
                }
                Task::none()
            }
            // --- Календари ---
            Message::OpenDatePicker(which) => {
                self.date_picker_open = which;
                Task::none()
            }
            Message::CancelDatePicker => {
                self.date_picker_open = DatePickerOpen::None;
                Task::none()
            }
            Message::DatePicked(date) => {
                match self.date_picker_open {
                    DatePickerOpen::ScheduleForm => self.schedule_form_date = date,
                    DatePickerOpen::AttendanceDate => self.attendance_date = date,
                    DatePickerOpen::None => {}
                }
                self.date_picker_open = DatePickerOpen::None;
                Task::none()
            }
            // --- Пользователи ---
            Message::UsersLoaded(Ok(users)) => {
                self.users = users;
                Task::none()
            }
            Message::UsersLoaded(Err(e)) => self.report_load_error("пользователи", e),
            Message::UserFilterChanged(value) => {
                self.user_filter_text = value;
                Task::none()
            }
            Message::UserRoleFilterChanged(role) => {
                self.user_role_filter = Some(role);
                Task::none()
            }
            Message::ClearUserRoleFilter => {
                self.user_role_filter = None;
                Task::none()
            }
            Message::OpenUserModal(existing) => {
                self.user_form_error = None;
                match existing {
                    Some(user) => {
                        self.editing_user_id = Some(user.id);
                        self.user_form_name = user.name;
                        self.user_form_email = user.email;
                        self.user_form_dob = user.dob.unwrap_or_default();
                        self.user_form_phone = user.phone.unwrap_or_default();
                        self.user_form_gender = user.gender.unwrap_or_default();
                        self.user_form_role = Some(user.role);
                    }
                    None => {
                        self.editing_user_id = None;
                        self.user_form_name.clear();
                        self.user_form_email.clear();
                        self.user_form_dob.clear();
                        self.user_form_phone.clear();
                        self.user_form_gender.clear();
                        self.user_form_role = None;
                    }
                }
                self.show_user_modal = true;
                Task::none()
            }
            Message::CloseUserModal => {
                self.show_user_modal = false;
                Task::none()
            }
            Message::UserFormNameChanged(v) => {
                self.user_form_name = v;
                Task::none()
            }
            Message::UserFormEmailChanged(v) => {
                self.user_form_email = v;
                Task::none()
            }
            Message::UserFormDobChanged(v) => {
                self.user_form_dob = v;
                Task::none()
            }
            Message::UserFormPhoneChanged(v) => {
                self.user_form_phone = v;
                Task::none()
            }
            Message::UserFormGenderChanged(v) => {
                self.user_form_gender = v;
                Task::none()
            }
            Message::UserFormRoleChanged(role) => {
                self.user_form_role = Some(role);
                Task::none()
            }
            Message::SubmitUserForm => {
                let name = self.user_form_name.trim().to_string();
                if name.is_empty() {
                    self.user_form_error = Some("Укажите имя".to_string());
                    return Task::none();
                }
                let email = self.user_form_email.trim().to_string();
                if !valid_email(&email) {
                    self.user_form_error = Some("Введите корректный e-mail".to_string());
                    return Task::none();
                }
                let dob = opt(&self.user_form_dob);
                if let Some(d) = &dob {
                    if NaiveDate::parse_from_str(d, "%Y-%m-%d").is_err() {
                        self.user_form_error =
                            Some("Дата рождения в формате ГГГГ-ММ-ДД".to_string());
                        return Task::none();
                    }
                }
                let Some(role) = self.user_form_role else {
                    self.user_form_error = Some("Выберите роль".to_string());
                    return Task::none();
                };
                let payload = UserPayload {
                    name,
                    email,
                    dob,
                    phone: opt(&self.user_form_phone),
                    gender: opt(&self.user_form_gender),
                    role,
                };
                let api = self.api.clone();
                match self.editing_user_id {
                    Some(id) => Task::perform(
                        async move {
                            api.update_user(id, &payload)
                                .await
                                .map(|_| ())
                                .map_err(|e| e.to_string())
                        },
                        Message::UserSaved,
                    ),
                    None => Task::perform(
                        async move {
                            api.create_user(&payload)
                                .await
                                .map(|_| ())
                                .map_err(|e| e.to_string())
                        },
                        Message::UserSaved,
                    ),
                }
            }
            Message::UserSaved(Ok(())) => {
                self.show_user_modal = false;
                self.status_message = "Пользователь сохранён".to_string();
                self.load_users()
            }
            Message::UserSaved(Err(e)) => {
                self.user_form_error = Some(e);
                Task::none()
            }
            Message::AskDeleteUser(user) => {
                self.confirm_delete_user = Some(user);
                Task::none()
            }
            Message::CancelDeleteUser => {
                self.confirm_delete_user = None;
                Task::none()
            }
            Message::ConfirmDeleteUser => {
                let Some(user) = self.confirm_delete_user.take() else {
                    return Task::none();
                };
                let api = self.api.clone();
                Task::perform(
                    async move { api.delete_user(user.id).await.map_err(|e| e.to_string()) },
                    Message::UserDeleted,
                )
            }
            Message::UserDeleted(Ok(())) => {
                self.status_message = "Пользователь удалён".to_string();
                self.load_users()
            }
            Message::UserDeleted(Err(e)) => {
                self.error_message = e;
                Task::none()
            }
            // --- Классы ---
            Message::ClassesLoaded(Ok(classes)) => {
                self.classes = classes;
                Task::none()
            }
            Message::ClassesLoaded(Err(e)) => self.report_load_error("классы", e),
            Message::ClassFilterChanged(value) => {
                self.class_filter_text = value;
                Task::none()
            }
            Message::OpenClassModal(existing) => {
                self.class_form_error = None;
                match existing {
                    Some(class) => {
                        self.editing_class_id = Some(class.id);
                        self.class_form_name = class.name;
                        self.class_form_grade = class.grade.unwrap_or_default();
                        self.class_form_teacher = class
                            .teacher_id
                            .and_then(|id| self.users.iter().find(|u| u.id == id).cloned());
                    }
                    None => {
                        self.editing_class_id = None;
                        self.class_form_name.clear();
                        self.class_form_grade.clear();
                        self.class_form_teacher = None;
                    }
                }
                self.show_class_modal = true;
                Task::none()
            }
            Message::CloseClassModal => {
                self.show_class_modal = false;
                Task::none()
            }
            Message::ClassFormNameChanged(v) => {
                self.class_form_name = v;
                Task::none()
            }
            Message::ClassFormGradeChanged(v) => {
                self.class_form_grade = v;
                Task::none()
            }
            Message::ClassFormTeacherChanged(teacher) => {
                self.class_form_teacher = Some(teacher);
                Task::none()
            }
            Message::SubmitClassForm => {
                let name = self.class_form_name.trim().to_string();
                if name.is_empty() {
                    self.class_form_error = Some("Укажите название класса".to_string());
                    return Task::none();
                }
                let payload = ClassPayload {
                    name,
                    grade: opt(&self.class_form_grade),
                    teacher_id: self.class_form_teacher.as_ref().map(|t| t.id),
                };
                let api = self.api.clone();
                match self.editing_class_id {
                    Some(id) => Task::perform(
                        async move {
                            api.update_class(id, &payload)
                                .await
                                .map(|_| ())
                                .map_err(|e| e.to_string())
                        },
                        Message::ClassSaved,
                    ),
                    None => Task::perform(
                        async move {
                            api.create_class(&payload)
                                .await
                                .map(|_| ())
                                .map_err(|e| e.to_string())
                        },
                        Message::ClassSaved,
                    ),
                }
            }
            Message::ClassSaved(Ok(())) => {
                self.show_class_modal = false;
                self.status_message = "Класс сохранён".to_string();
                self.load_classes()
            }
            Message::ClassSaved(Err(e)) => {
                self.class_form_error = Some(e);
                Task::none()
            }
            Message::AskDeleteClass(class) => {
                self.confirm_delete_class = Some(class);
                Task::none()
            }
            Message::CancelDeleteClass => {
                self.confirm_delete_class = None;
                Task::none()
            }
            Message::ConfirmDeleteClass => {
                let Some(class) = self.confirm_delete_class.take() else {
                    return Task::none();
                };
                let api = self.api.clone();
                Task::perform(
                    async move { api.delete_class(class.id).await.map_err(|e| e.to_string()) },
                    Message::ClassDeleted,
                )
            }
            Message::ClassDeleted(Ok(())) => {
                self.status_message = "Класс удалён".to_string();
                self.load_classes()
            }
            Message::ClassDeleted(Err(e)) => {
                self.error_message = e;
                Task::none()
            }
            // --- Расписание ---
            Message::SchedulesLoaded(Ok(schedules)) => {
                self.schedules = schedules;
                Task::none()
            }
            Message::SchedulesLoaded(Err(e)) => self.report_load_error("расписание", e),
            Message::ScheduleFilterChanged(value) => {
                self.schedule_filter_text = value;
                Task::none()
            }
            Message::OpenScheduleModal(existing) => {
                self.schedule_form_error = None;
                match existing {
                    Some(schedule) => {
                        self.editing_schedule_id = Some(schedule.id);
                        self.schedule_form_class = schedule
                            .class_id
                            .and_then(|id| self.classes.iter().find(|c| c.id == id).cloned());
                        self.schedule_form_room = schedule.room.unwrap_or_default();
                        if let Some(date) = schedule.date {
                            self.schedule_form_date = to_picker_date(date);
                        }
                        self.schedule_form_start = schedule.start_time.unwrap_or_default();
                        self.schedule_form_end = schedule.end_time.unwrap_or_default();
                    }
                    None => {
                        self.editing_schedule_id = None;
                        self.schedule_form_class = None;
                        self.schedule_form_room.clear();
                        self.schedule_form_date = Date::today();
                        self.schedule_form_start.clear();
                        self.schedule_form_end.clear();
                    }
                }
                self.show_schedule_modal = true;
                Task::none()
            }
            Message::CloseScheduleModal => {
                self.show_schedule_modal = false;
                self.date_picker_open = DatePickerOpen::None;
                Task::none()
            }
            Message::ScheduleFormClassChanged(class) => {
                self.schedule_form_class = Some(class);
                Task::none()
            }
            Message::ScheduleFormRoomChanged(v) => {
                self.schedule_form_room = v;
                Task::none()
            }
            Message::ScheduleFormStartChanged(v) => {
                self.schedule_form_start = v;
                Task::none()
            }
            Message::ScheduleFormEndChanged(v) => {
                self.schedule_form_end = v;
                Task::none()
            }
            Message::SubmitScheduleForm => {
                let Some(class) = &self.schedule_form_class else {
                    self.schedule_form_error = Some("Выберите класс".to_string());
                    return Task::none();
                };
                let start = self.schedule_form_start.trim().to_string();
                let end = self.schedule_form_end.trim().to_string();
                if !valid_time(&start) || !valid_time(&end) {
                    self.schedule_form_error = Some("Время в формате ЧЧ:ММ".to_string());
                    return Task::none();
                }
                if start >= end {
                    self.schedule_form_error =
                        Some("Начало должно быть раньше окончания".to_string());
                    return Task::none();
                }
                let payload = SchedulePayload {
                    class_id: class.id,
                    room: opt(&self.schedule_form_room),
                    date: naive_date(self.schedule_form_date),
                    start_time: start,
                    end_time: end,
                };
                let api = self.api.clone();
                match self.editing_schedule_id {
                    Some(id) => Task::perform(
                        async move {
                            api.update_schedule(id, &payload)
                                .await
                                .map(|_| ())
                                .map_err(|e| e.to_string())
                        },
                        Message::ScheduleSaved,
                    ),
                    None => Task::perform(
                        async move {
                            api.create_schedule(&payload)
                                .await
                                .map(|_| ())
                                .map_err(|e| e.to_string())
                        },
                        Message::ScheduleSaved,
                    ),
                }
            }
            Message::ScheduleSaved(Ok(())) => {
                self.show_schedule_modal = false;
                self.status_message = "Занятие сохранено".to_string();
                self.load_schedules()
            }
            Message::ScheduleSaved(Err(e)) => {
                self.schedule_form_error = Some(e);
                Task::none()
            }
            Message::AskDeleteSchedule(schedule) => {
                self.confirm_delete_schedule = Some(schedule);
                Task::none()
            }
            Message::CancelDeleteSchedule => {
                self.confirm_delete_schedule = None;
                Task::none()
            }
            Message::ConfirmDeleteSchedule => {
                let Some(schedule) = self.confirm_delete_schedule.take() else {
                    return Task::none();
                };
                let api = self.api.clone();
                Task::perform(
                    async move {
                        api.delete_schedule(schedule.id)
                            .await
                            .map_err(|e| e.to_string())
                    },
                    Message::ScheduleDeleted,
                )
            }
            Message::ScheduleDeleted(Ok(())) => {
                self.status_message = "Занятие удалено".to_string();
                self.load_schedules()
            }
            Message::ScheduleDeleted(Err(e)) => {
                self.error_message = e;
                Task::none()
            }
            // --- Табель посещаемости ---
            Message::OpenAttendanceModal(schedule) => {
                self.error_message.clear();
                self.status_message.clear();
                self.attendance_load_seq += 1;
                let seq = self.attendance_load_seq;
                self.show_attendance_modal = true;
                self.attendance_loading = true;
                self.attendance_submitting = false;
                self.attendance_sheet = None;
                self.attendance_class_name = schedule
                    .class_name
                    .clone()
                    .unwrap_or_else(|| format!("Занятие №{}", schedule.id));
                let sref = ScheduleRef::from(&schedule);
                self.attendance_ref = Some(sref.clone());
                let api = self.api.clone();
                Task::perform(load_attendance_data(api, sref), move |result| {
                    Message::AttendanceLoaded(seq, result)
                })
            }
            Message::AttendanceLoaded(seq, result) => {
                // устаревший ответ: окно успели закрыть или переоткрыть
                if seq != self.attendance_load_seq || !self.show_attendance_modal {
                    return Task::none();
                }
                self.attendance_loading = false;
                match result {
                    Ok((sref, roster, records)) => {
                        let date = naive_date(self.attendance_date);
                        self.attendance_ref = Some(sref);
                        self.attendance_sheet =
                            Some(AttendanceSheet::build(roster, &records, date));
                    }
                    Err(e) => {
                        log::error!("загрузка табеля: {e}");
                        self.attendance_sheet = None;
                        self.error_message = e;
                    }
                }
                Task::none()
            }
            Message::SetAttendanceStatus(student_id, status) => {
                if let Some(sheet) = &mut self.attendance_sheet {
                    sheet.set_status(student_id, status, None);
                }
                Task::none()
            }
            Message::MarkAllAbsent => {
                if let Some(sheet) = &mut self.attendance_sheet {
                    sheet.mark_all_absent();
                }
                Task::none()
            }
            Message::SubmitAttendance => {
                let Some(sheet) = &self.attendance_sheet else {
                    return Task::none();
                };
                if self.attendance_submitting || !sheet.is_ready() {
                    return Task::none();
                }
                let Some(occurrence_id) =
                    self.attendance_ref.as_ref().and_then(ScheduleRef::occurrence_id)
                else {
                    self.error_message = "Не удалось определить занятие".to_string();
                    return Task::none();
                };
                let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
                let (batch, edits) = build_submission(sheet, occurrence_id, &now);
                self.attendance_submitting = true;
                let api = self.api.clone();
                Task::perform(
                    submit_attendance(api, occurrence_id, batch, edits),
                    Message::AttendanceSubmitted,
                )
            }
            Message::AttendanceSubmitted(result) => {
                self.attendance_submitting = false;
                match result {
                    Ok(records) => {
                        log::debug!("табель подтверждён, записей: {}", records.len());
                        self.status_message = "Посещаемость сохранена".to_string();
                        self.show_attendance_modal = false;
                        self.attendance_sheet = None;
                        self.attendance_ref = None;
                        self.attendance_load_seq += 1;
                    }
                    Err(e) => {
                        // окно остаётся открытым, черновики не теряются
                        log::error!("отправка табеля: {e}");
                        self.error_message = e;
                    }
                }
                Task::none()
            }
            Message::CloseAttendanceModal => {
                self.show_attendance_modal = false;
                self.attendance_loading = false;
                self.attendance_submitting = false;
                self.attendance_sheet = None;
                self.attendance_ref = None;
                // ответ незавершённой загрузки после закрытия не нужен
                self.attendance_load_seq += 1;
                Task::none()
            }
            // --- Оплата обучения ---
            Message::TuitionsLoaded(Ok(tuitions)) => {
                self.tuitions = tuitions;
                Task::none()
            }
            Message::TuitionsLoaded(Err(e)) => self.report_load_error("оплата обучения", e),
            Message::TuitionFilterChanged(value) => {
                self.tuition_filter_text = value;
                Task::none()
            }
            Message::TuitionStatusFilterChanged(status) => {
                self.tuition_status_filter = Some(status);
                Task::none()
            }
            Message::ClearTuitionStatusFilter => {
                self.tuition_status_filter = None;
                Task::none()
            }
            Message::TuitionMinAmountChanged(value) => {
                self.tuition_min_amount = money::reformat_input(&value);
                Task::none()
            }
            Message::TuitionMaxAmountChanged(value) => {
                self.tuition_max_amount = money::reformat_input(&value);
                Task::none()
            }
            Message::OpenTuitionModal(existing) => {
                self.tuition_form_error = None;
                match existing {
                    Some(invoice) => {
                        self.editing_tuition_id = Some(invoice.id);
                        self.tuition_form_student = self
                            .users
                            .iter()
                            .find(|u| u.id == invoice.student_id)
                            .cloned();
                        self.tuition_form_class = invoice.class_name.as_deref().and_then(|name| {
                            self.classes.iter().find(|c| c.name == name).cloned()
                        });
                        self.tuition_form_amount = money::format_amount(invoice.amount);
                        self.tuition_form_month = invoice.month;
                        self.tuition_form_status = Some(invoice.status);
                    }
                    None => {
                        self.editing_tuition_id = None;
                        self.tuition_form_student = None;
                        self.tuition_form_class = None;
                        self.tuition_form_amount.clear();
                        self.tuition_form_month.clear();
                        self.tuition_form_status = None;
                    }
                }
                self.show_tuition_modal = true;
                Task::none()
            }
            Message::CloseTuitionModal => {
                self.show_tuition_modal = false;
                Task::none()
            }
            Message::TuitionFormStudentChanged(student) => {
                self.tuition_form_student = Some(student);
                Task::none()
            }
            Message::TuitionFormClassChanged(class) => {
                self.tuition_form_class = Some(class);
                Task::none()
            }
            Message::TuitionFormAmountChanged(value) => {
                self.tuition_form_amount = money::reformat_input(&value);
                Task::none()
            }
            Message::TuitionFormMonthChanged(value) => {
                self.tuition_form_month = value;
                Task::none()
            }
            Message::TuitionFormStatusChanged(status) => {
                self.tuition_form_status = Some(status);
                Task::none()
            }
            Message::SubmitTuitionForm => {
                let Some(student) = &self.tuition_form_student else {
                    self.tuition_form_error = Some("Выберите студента".to_string());
                    return Task::none();
                };
                let Some(amount) = money::parse_amount(&self.tuition_form_amount) else {
                    self.tuition_form_error = Some("Укажите сумму".to_string());
                    return Task::none();
                };
                if amount <= 0.0 {
                    self.tuition_form_error = Some("Сумма должна быть больше нуля".to_string());
                    return Task::none();
                }
                let month = self.tuition_form_month.trim().to_string();
                if !valid_month(&month) {
                    self.tuition_form_error = Some("Месяц в формате ГГГГ-ММ".to_string());
                    return Task::none();
                }
                let payload = TuitionPayload {
                    student_id: student.id,
                    class_id: self.tuition_form_class.as_ref().map(|c| c.id),
                    amount,
                    month,
                    status: self
                        .tuition_form_status
                        .clone()
                        .unwrap_or_else(|| "unpaid".to_string()),
                };
                let api = self.api.clone();
                match self.editing_tuition_id {
                    Some(id) => Task::perform(
                        async move {
                            api.update_tuition(id, &payload)
                                .await
                                .map(|_| ())
                                .map_err(|e| e.to_string())
                        },
                        Message::TuitionSaved,
                    ),
                    None => Task::perform(
                        async move {
                            api.create_tuition(&payload)
                                .await
                                .map(|_| ())
                                .map_err(|e| e.to_string())
                        },
                        Message::TuitionSaved,
                    ),
                }
            }
            Message::TuitionSaved(Ok(())) => {
                self.show_tuition_modal = false;
                self.status_message = "Счёт сохранён".to_string();
                self.load_tuitions()
            }
            Message::TuitionSaved(Err(e)) => {
                self.tuition_form_error = Some(e);
                Task::none()
            }
            Message::AskDeleteTuition(invoice) => {
                self.confirm_delete_tuition = Some(invoice);
                Task::none()
            }
            Message::CancelDeleteTuition => {
                self.confirm_delete_tuition = None;
                Task::none()
            }
            Message::ConfirmDeleteTuition => {
                let Some(invoice) = self.confirm_delete_tuition.take() else {
                    return Task::none();
                };
                let api = self.api.clone();
                Task::perform(
                    async move { api.delete_tuition(invoice.id).await.map_err(|e| e.to_string()) },
                    Message::TuitionDeleted,
                )
            }
            Message::TuitionDeleted(Ok(())) => {
                self.status_message = "Счёт удалён".to_string();
                self.load_tuitions()
            }
            Message::TuitionDeleted(Err(e)) => {
                self.error_message = e;
                Task::none()
            }
            // --- Зарплата ---
            Message::PayrollsLoaded(Ok(payrolls)) => {
                self.payrolls = payrolls;
                Task::none()
            }
            Message::PayrollsLoaded(Err(e)) => self.report_load_error("зарплата", e),
            Message::PayrollFilterChanged(value) => {
                self.payroll_filter_text = value;
                Task::none()
            }
            Message::PayrollMonthFilterChanged(value) => {
                self.payroll_month_filter = value;
                Task::none()
            }
            Message::OpenPayrollModal(existing) => {
                self.payroll_form_error = None;
                match existing {
                    Some(entry) => {
                        self.editing_payroll_id = Some(entry.id);
                        self.payroll_form_teacher = self
                            .users
                            .iter()
                            .find(|u| u.id == entry.teacher_id)
                            .cloned();
                        self.payroll_form_month = entry.month;
                        self.payroll_form_base = money::format_amount(entry.base_salary);
                        self.payroll_form_bonus = money::format_amount(entry.bonus);
                        self.payroll_form_deductions = money::format_amount(entry.deductions);
                    }
                    None => {
                        self.editing_payroll_id = None;
                        self.payroll_form_teacher = None;
                        self.payroll_form_month.clear();
                        self.payroll_form_base.clear();
                        self.payroll_form_bonus.clear();
                        self.payroll_form_deductions.clear();
                    }
                }
                self.show_payroll_modal = true;
                Task::none()
            }
            Message::ClosePayrollModal => {
                self.show_payroll_modal = false;
                Task::none()
            }
            Message::PayrollFormTeacherChanged(teacher) => {
                self.payroll_form_teacher = Some(teacher);
                Task::none()
            }
            Message::PayrollFormMonthChanged(value) => {
                self.payroll_form_month = value;
                Task::none()
            }
            Message::PayrollFormBaseChanged(value) => {
                self.payroll_form_base = money::reformat_input(&value);
                Task::none()
            }
            Message::PayrollFormBonusChanged(value) => {
                self.payroll_form_bonus = money::reformat_input(&value);
                Task::none()
            }
            Message::PayrollFormDeductionsChanged(value) => {
                self.payroll_form_deductions = money::reformat_input(&value);
                Task::none()
            }
            Message::SubmitPayrollForm => {
                let Some(teacher) = &self.payroll_form_teacher else {
                    self.payroll_form_error = Some("Выберите преподавателя".to_string());
                    return Task::none();
                };
                let month = self.payroll_form_month.trim().to_string();
                if !valid_month(&month) {
                    self.payroll_form_error = Some("Месяц в формате ГГГГ-ММ".to_string());
                    return Task::none();
                }
                let Some(base_salary) = money::parse_amount(&self.payroll_form_base) else {
                    self.payroll_form_error = Some("Укажите оклад".to_string());
                    return Task::none();
                };
                let bonus = money::parse_amount(&self.payroll_form_bonus).unwrap_or(0.0);
                let deductions = money::parse_amount(&self.payroll_form_deductions).unwrap_or(0.0);
                let payload = PayrollPayload {
                    teacher_id: teacher.id,
                    month,
                    base_salary,
                    bonus,
                    deductions,
                };
                let api = self.api.clone();
                match self.editing_payroll_id {
                    Some(id) => Task::perform(
                        async move {
                            api.update_payroll(id, &payload)
                                .await
                                .map(|_| ())
                                .map_err(|e| e.to_string())
                        },
                        Message::PayrollSaved,
                    ),
                    None => Task::perform(
                        async move {
                            api.create_payroll(&payload)
                                .await
                                .map(|_| ())
                                .map_err(|e| e.to_string())
                        },
                        Message::PayrollSaved,
                    ),
                }
            }
            Message::PayrollSaved(Ok(())) => {
                self.show_payroll_modal = false;
                self.status_message = "Начисление сохранено".to_string();
                self.load_payrolls()
            }
            Message::PayrollSaved(Err(e)) => {
                self.payroll_form_error = Some(e);
                Task::none()
            }
            Message::AskDeletePayroll(entry) => {
                self.confirm_delete_payroll = Some(entry);
                Task::none()
            }
            Message::CancelDeletePayroll => {
                self.confirm_delete_payroll = None;
                Task::none()
            }
            Message::ConfirmDeletePayroll => {
                let Some(entry) = self.confirm_delete_payroll.take() else {
                    return Task::none();
                };
                let api = self.api.clone();
                Task::perform(
                    async move { api.delete_payroll(entry.id).await.map_err(|e| e.to_string()) },
                    Message::PayrollDeleted,
                )
            }
            Message::PayrollDeleted(Ok(())) => {
                self.status_message = "Начисление удалено".to_string();
                self.load_payrolls()
            }
            Message::PayrollDeleted(Err(e)) => {
                self.error_message = e;
                Task::none()
            }
            // --- Отзывы о преподавателях ---
            Message::ReviewsLoaded(Ok(reviews)) => {
                self.reviews = reviews;
                Task::none()
            }
            Message::ReviewsLoaded(Err(e)) => self.report_load_error("отзывы", e),
            Message::ReviewFilterChanged(value) => {
                self.review_filter_text = value;
                Task::none()
            }
            Message::ReviewMinRatingChanged(rating) => {
                self.review_min_rating = Some(rating);
                Task::none()
            }
            Message::ClearReviewRatingFilter => {
                self.review_min_rating = None;
                Task::none()
            }
            Message::OpenReviewModal(existing) => {
                self.review_form_error = None;
                match existing {
                    Some(review) => {
                        self.editing_review_id = Some(review.id);
                        self.review_form_teacher = self
                            .users
                            .iter()
                            .find(|u| u.id == review.teacher_id)
                            .cloned();
                        self.review_form_rating = Some(review.rating);
                        self.review_form_comment = review.comment.unwrap_or_default();
                    }
                    None => {
                        self.editing_review_id = None;
                        self.review_form_teacher = None;
                        self.review_form_rating = None;
                        self.review_form_comment.clear();
                    }
                }
                self.show_review_modal = true;
                Task::none()
            }
            Message::CloseReviewModal => {
                self.show_review_modal = false;
                Task::none()
            }
            Message::ReviewFormTeacherChanged(teacher) => {
                self.review_form_teacher = Some(teacher);
                Task::none()
            }
            Message::ReviewFormRatingChanged(rating) => {
                self.review_form_rating = Some(rating);
                Task::none()
            }
            Message::ReviewFormCommentChanged(value) => {
                self.review_form_comment = value;
                Task::none()
            }
            Message::SubmitReviewForm => {
                let Some(teacher) = &self.review_form_teacher else {
                    self.review_form_error = Some("Выберите преподавателя".to_string());
                    return Task::none();
                };
                let Some(rating) = self.review_form_rating else {
                    self.review_form_error = Some("Поставьте оценку".to_string());
                    return Task::none();
                };
                let payload = ReviewPayload {
                    teacher_id: teacher.id,
                    rating,
                    comment: opt(&self.review_form_comment),
                };
                let api = self.api.clone();
                match self.editing_review_id {
                    Some(id) => Task::perform(
                        async move {
                            api.update_review(id, &payload)
                                .await
                                .map(|_| ())
                                .map_err(|e| e.to_string())
                        },
                        Message::ReviewSaved,
                    ),
                    None => Task::perform(
                        async move {
                            api.create_review(&payload)
                                .await
                                .map(|_| ())
                                .map_err(|e| e.to_string())
                        },
                        Message::ReviewSaved,
                    ),
                }
            }
            Message::ReviewSaved(Ok(())) => {
                self.show_review_modal = false;
                self.status_message = "Отзыв сохранён".to_string();
                self.load_reviews()
            }
            Message::ReviewSaved(Err(e)) => {
                self.review_form_error = Some(e);
                Task::none()
            }
            Message::AskDeleteReview(review) => {
                self.confirm_delete_review = Some(review);
                Task::none()
            }
            Message::CancelDeleteReview => {
                self.confirm_delete_review = None;
                Task::none()
            }
            Message::ConfirmDeleteReview => {
                let Some(review) = self.confirm_delete_review.take() else {
                    return Task::none();
                };
                let api = self.api.clone();
                Task::perform(
                    async move { api.delete_review(review.id).await.map_err(|e| e.to_string()) },
                    Message::ReviewDeleted,
                )
            }
            Message::ReviewDeleted(Ok(())) => {
                self.status_message = "Отзыв удалён".to_string();
                self.load_reviews()
            }
            Message::ReviewDeleted(Err(e)) => {
                self.error_message = e;
                Task::none()
            }
            // --- Оценки ---
            Message::EvaluationsLoaded(Ok(evaluations)) => {
                self.evaluations = evaluations;
                Task::none()
            }
            Message::EvaluationsLoaded(Err(e)) => self.report_load_error("оценки", e),
            Message::EvaluationFilterChanged(value) => {
                self.evaluation_filter_text = value;
                Task::none()
            }
            Message::OpenEvaluationModal(existing) => {
                self.evaluation_form_error = None;
                match existing {
                    Some(evaluation) => {
                        self.editing_evaluation_id = Some(evaluation.id);
                        self.evaluation_form_student = self
                            .users
                            .iter()
                            .find(|u| u.id == evaluation.student_id)
                            .cloned();
                        self.evaluation_form_class = evaluation
                            .class_id
                            .and_then(|id| self.classes.iter().find(|c| c.id == id).cloned());
                        self.evaluation_form_score = evaluation.score.to_string();
                        self.evaluation_form_comment = evaluation.comment.unwrap_or_default();
                    }
                    None => {
                        self.editing_evaluation_id = None;
                        self.evaluation_form_student = None;
                        self.evaluation_form_class = None;
                        self.evaluation_form_score.clear();
                        self.evaluation_form_comment.clear();
                    }
                }
                self.show_evaluation_modal = true;
                Task::none()
            }
            Message::CloseEvaluationModal => {
                self.show_evaluation_modal = false;
                Task::none()
            }
            Message::EvaluationFormStudentChanged(student) => {
                self.evaluation_form_student = Some(student);
                Task::none()
            }
            Message::EvaluationFormClassChanged(class) => {
                self.evaluation_form_class = Some(class);
                Task::none()
            }
            Message::EvaluationFormScoreChanged(value) => {
                self.evaluation_form_score = value;
                Task::none()
            }
            Message::EvaluationFormCommentChanged(value) => {
                self.evaluation_form_comment = value;
                Task::none()
            }
            Message::SubmitEvaluationForm => {
                let Some(student) = &self.evaluation_form_student else {
                    self.evaluation_form_error = Some("Выберите студента".to_string());
                    return Task::none();
                };
                let Ok(score) = self.evaluation_form_score.trim().parse::<f64>() else {
                    self.evaluation_form_error = Some("Укажите балл числом".to_string());
                    return Task::none();
                };
                if !(0.0..=100.0).contains(&score) {
                    self.evaluation_form_error = Some("Балл от 0 до 100".to_string());
                    return Task::none();
                }
                // при редактировании дата выставления не меняется
                let date = self
                    .editing_evaluation_id
                    .and_then(|id| self.evaluations.iter().find(|e| e.id == id))
                    .map(|e| e.date)
                    .unwrap_or_else(|| chrono::Local::now().date_naive());
                let payload = EvaluationPayload {
                    student_id: student.id,
                    class_id: self.evaluation_form_class.as_ref().map(|c| c.id),
                    score,
                    comment: opt(&self.evaluation_form_comment),
                    date,
                };
                let api = self.api.clone();
                match self.editing_evaluation_id {
                    Some(id) => Task::perform(
                        async move {
                            api.update_evaluation(id, &payload)
                                .await
                                .map(|_| ())
                                .map_err(|e| e.to_string())
                        },
                        Message::EvaluationSaved,
                    ),
                    None => Task::perform(
                        async move {
                            api.create_evaluation(&payload)
                                .await
                                .map(|_| ())
                                .map_err(|e| e.to_string())
                        },
                        Message::EvaluationSaved,
                    ),
                }
            }
            Message::EvaluationSaved(Ok(())) => {
                self.show_evaluation_modal = false;
                self.status_message = "Оценка сохранена".to_string();
                self.load_evaluations()
            }
            Message::EvaluationSaved(Err(e)) => {
                self.evaluation_form_error = Some(e);
                Task::none()
            }
            Message::AskDeleteEvaluation(evaluation) => {
                self.confirm_delete_evaluation = Some(evaluation);
                Task::none()
            }
            Message::CancelDeleteEvaluation => {
                self.confirm_delete_evaluation = None;
                Task::none()
            }
            Message::ConfirmDeleteEvaluation => {
                let Some(evaluation) = self.confirm_delete_evaluation.take() else {
                    return Task::none();
                };
                let api = self.api.clone();
                Task::perform(
                    async move {
                        api.delete_evaluation(evaluation.id)
                            .await
                            .map_err(|e| e.to_string())
                    },
                    Message::EvaluationDeleted,
                )
            }
            Message::EvaluationDeleted(Ok(())) => {
                self.status_message = "Оценка удалена".to_string();
                self.load_evaluations()
            }
            Message::EvaluationDeleted(Err(e)) => {
                self.error_message = e;
                Task::none()
            }
        }
    }

    fn report_load_error(&mut self, what: &str, error: String) -> Task<Message> {
        log::error!("загрузка ({what}): {error}");
        self.error_message = error;
        Task::none()
    }

    fn load_users(&self) -> Task<Message> {
        let api = self.api.clone();
        Task::perform(
            async move { api.fetch_users().await.map_err(|e| e.to_string()) },
            Message::UsersLoaded,
        )
    }

    fn load_classes(&self) -> Task<Message> {
        let api = self.api.clone();
        Task::perform(
            async move { api.fetch_classes().await.map_err(|e| e.to_string()) },
            Message::ClassesLoaded,
        )
    }

    fn load_schedules(&self) -> Task<Message> {
        let api = self.api.clone();
        Task::perform(
            async move { api.fetch_schedules().await.map_err(|e| e.to_string()) },
            Message::SchedulesLoaded,
        )
    }

    fn load_tuitions(&self) -> Task<Message> {
        let api = self.api.clone();
        Task::perform(
            async move { api.fetch_tuitions().await.map_err(|e| e.to_string()) },
            Message::TuitionsLoaded,
        )
    }

    fn load_payrolls(&self) -> Task<Message> {
        let api = self.api.clone();
        Task::perform(
            async move { api.fetch_payrolls().await.map_err(|e| e.to_string()) },
            Message::PayrollsLoaded,
        )
    }

    fn load_reviews(&self) -> Task<Message> {
        let api = self.api.clone();
        Task::perform(
            async move { api.fetch_reviews().await.map_err(|e| e.to_string()) },
            Message::ReviewsLoaded,
        )
    }

    fn load_evaluations(&self) -> Task<Message> {
        let api = self.api.clone();
        Task::perform(
            async move { api.fetch_evaluations().await.map_err(|e| e.to_string()) },
            Message::EvaluationsLoaded,
        )
    }
}

/// Полная загрузка данных табеля. Ссылка может не знать класс занятия;
/// тогда он дотягивается отдельным запросом и кэшируется в ссылке.
async fn load_attendance_data(
    api: ApiClient,
    mut sref: ScheduleRef,
) -> Result<(ScheduleRef, Vec<RosterEntry>, Vec<AttendanceRecord>), String> {
    let Some(occurrence_id) = sref.occurrence_id() else {
        return Err("Не удалось определить занятие".to_string());
    };
    if sref.class_id.is_none() {
        let schedule = api
            .fetch_schedule(occurrence_id)
            .await
            .map_err(|e| e.to_string())?;
        sref.class_id = schedule.class_id;
    }
    let Some(class_id) = sref.class_id else {
        return Err("У занятия не указан класс".to_string());
    };
    let (roster, records) = futures::join!(
        api.fetch_roster(class_id),
        api.fetch_attendance(occurrence_id)
    );
    Ok((
        sref,
        roster.map_err(|e| e.to_string())?,
        records.map_err(|e| e.to_string())?,
    ))
}

/// Раскладывает готовый табель на один пакет создания и список поздних
/// отметок. Любая из частей может оказаться пустой.
fn build_submission(
    sheet: &AttendanceSheet,
    schedule_id: i64,
    now: &str,
) -> (BatchCreateAttendance, Vec<LateEditAttendance>) {
    let (to_create, to_update) = sheet.partition(now);
    let date = sheet.date;
    let batch = BatchCreateAttendance {
        schedule_id,
        date,
        records: to_create,
    };
    let edits = to_update
        .into_iter()
        .map(|edit| LateEditAttendance {
            student_id: edit.student_id,
            schedule_id,
            checkin_time: edit.checkin_time,
            date,
        })
        .collect();
    (batch, edits)
}

/// Отправка табеля: пакет создания и поздние отметки уходят параллельно.
/// Свежий список запрашивается только после того, как завершатся обе
/// ветви; любая ошибка отменяет обновление экрана целиком.
async fn submit_attendance(
    api: ApiClient,
    schedule_id: i64,
    batch: BatchCreateAttendance,
    edits: Vec<LateEditAttendance>,
) -> Result<Vec<AttendanceRecord>, String> {
    let create = async {
        if batch.records.is_empty() {
            Ok(Vec::new())
        } else {
            api.batch_create_attendance(&batch).await
        }
    };
    let edit_all = futures::future::join_all(edits.iter().map(|edit| api.late_edit_attendance(edit)));
    let (created, edited) = futures::join!(create, edit_all);
    created.map_err(|e| e.to_string())?;
    for result in edited {
        result.map_err(|e| e.to_string())?;
    }
    api.fetch_attendance(schedule_id)
        .await
        .map_err(|e| e.to_string())
}

fn opt(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn valid_email(value: &str) -> bool {
    Regex::new(r"^[\w.+-]+@[\w-]+\.[\w.-]+$")
        .map(|re| re.is_match(value))
        .unwrap_or(false)
}

fn valid_time(value: &str) -> bool {
    Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$")
        .map(|re| re.is_match(value))
        .unwrap_or(false)
}

fn valid_month(value: &str) -> bool {
    Regex::new(r"^\d{4}-(0[1-9]|1[0-2])$")
        .map(|re| re.is_match(value))
        .unwrap_or(false)
}

fn naive_date(date: Date) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year, date.month, date.day).unwrap_or_default()
}

fn to_picker_date(date: NaiveDate) -> Date {
    use chrono::Datelike;
    Date {
        year: date.year(),
        month: date.month(),
        day: date.day(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{AttendanceStatus, RosterEntry, ScheduleRecord};

    fn roster_entry(id: i64) -> RosterEntry {
        RosterEntry {
            student_id: id,
            name: format!("Студент {id}"),
            email: None,
            dob: None,
            phone: None,
            gender: None,
        }
    }

    fn app_with_open_modal(seq: u64) -> App {
        let mut app = App::default();
        app.show_attendance_modal = true;
        app.attendance_loading = true;
        app.attendance_load_seq = seq;
        app.attendance_ref = Some(ScheduleRef {
            original_schedule_id: None,
            schedule_id: None,
            id: Some(7),
            class_id: Some(1),
        });
        app
    }

    #[test]
    fn load_error_keeps_modal_open_and_shows_message() {
        let mut app = app_with_open_modal(3);
        let _ = app.update(Message::AttendanceLoaded(
            3,
            Err("ошибка сети: connection refused".to_string()),
        ));
        assert!(app.show_attendance_modal);
        assert!(!app.attendance_loading);
        assert!(app.attendance_sheet.is_none());
        assert_eq!(app.error_message, "ошибка сети: connection refused");
    }

    #[test]
    fn stale_load_response_is_discarded() {
        let mut app = app_with_open_modal(5);
        let stale = Ok((
            ScheduleRef::default(),
            vec![roster_entry(1)],
            Vec::new(),
        ));
        let _ = app.update(Message::AttendanceLoaded(4, stale));
        // ответ прошлого поколения не трогает состояние
        assert!(app.attendance_loading);
        assert!(app.attendance_sheet.is_none());
    }

    #[test]
    fn close_invalidates_pending_load() {
        let mut app = app_with_open_modal(2);
        let _ = app.update(Message::CloseAttendanceModal);
        assert!(!app.show_attendance_modal);
        assert_eq!(app.attendance_load_seq, 3);

        let late = Ok((
            ScheduleRef::default(),
            vec![roster_entry(1)],
            Vec::new(),
        ));
        let _ = app.update(Message::AttendanceLoaded(2, late));
        assert!(app.attendance_sheet.is_none());
    }

    #[test]
    fn successful_load_builds_sheet() {
        let mut app = app_with_open_modal(1);
        let result = Ok((
            ScheduleRef {
                original_schedule_id: None,
                schedule_id: None,
                id: Some(7),
                class_id: Some(1),
            },
            vec![roster_entry(1), roster_entry(2)],
            Vec::new(),
        ));
        let _ = app.update(Message::AttendanceLoaded(1, result));
        assert!(!app.attendance_loading);
        let sheet = app.attendance_sheet.as_ref().unwrap();
        assert_eq!(sheet.roster().len(), 2);
        assert!(!sheet.is_ready());
    }

    #[test]
    fn submit_is_gated_until_every_student_is_marked() {
        let mut app = app_with_open_modal(1);
        app.attendance_loading = false;
        app.attendance_sheet = Some(AttendanceSheet::build(
            vec![roster_entry(1), roster_entry(2)],
            &[],
            NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
        ));

        let _ = app.update(Message::SetAttendanceStatus(
            1,
            Some(AttendanceStatus::Present),
        ));
        let _ = app.update(Message::SubmitAttendance);
        assert!(!app.attendance_submitting);

        let _ = app.update(Message::MarkAllAbsent);
        assert!(app.attendance_sheet.as_ref().unwrap().is_ready());
        let _ = app.update(Message::SubmitAttendance);
        assert!(app.attendance_submitting);
    }

    #[test]
    fn clearing_a_status_disables_submit_again() {
        let mut app = app_with_open_modal(1);
        app.attendance_loading = false;
        app.attendance_sheet = Some(AttendanceSheet::build(
            vec![roster_entry(1), roster_entry(2)],
            &[],
            NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
        ));
        let _ = app.update(Message::MarkAllAbsent);
        let _ = app.update(Message::SetAttendanceStatus(2, None));
        let _ = app.update(Message::SubmitAttendance);
        assert!(!app.attendance_submitting);
    }

    #[test]
    fn successful_submit_closes_modal() {
        let mut app = app_with_open_modal(1);
        app.attendance_loading = false;
        let mut sheet = AttendanceSheet::build(
            vec![roster_entry(1)],
            &[],
            NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
        );
        sheet.mark_all_absent();
        app.attendance_sheet = Some(sheet);
        app.attendance_submitting = true;

        let _ = app.update(Message::AttendanceSubmitted(Ok(Vec::new())));
        assert!(!app.attendance_submitting);
        assert!(!app.show_attendance_modal);
        assert!(app.attendance_sheet.is_none());
        assert_eq!(app.status_message, "Посещаемость сохранена");
    }

    #[test]
    fn submit_error_preserves_drafts() {
        let mut app = app_with_open_modal(1);
        app.attendance_loading = false;
        let mut sheet = AttendanceSheet::build(
            vec![roster_entry(1)],
            &[],
            NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
        );
        sheet.mark_all_absent();
        app.attendance_sheet = Some(sheet);
        app.attendance_submitting = true;

        let _ = app.update(Message::AttendanceSubmitted(Err(
            "нет доступа".to_string()
        )));
        assert!(!app.attendance_submitting);
        assert!(app.show_attendance_modal);
        let sheet = app.attendance_sheet.as_ref().unwrap();
        assert_eq!(
            sheet.draft(1).unwrap().status,
            Some(AttendanceStatus::Absent)
        );
        assert_eq!(app.error_message, "нет доступа");
    }

    #[test]
    fn opening_modal_clears_previous_notices() {
        let mut app = App::default();
        app.error_message = "класс не найден".to_string();
        app.status_message = "Занятие сохранено".to_string();
        let schedule = ScheduleRecord {
            id: 7,
            original_schedule_id: None,
            schedule_id: None,
            class_id: Some(1),
            class_name: Some("7-А".to_string()),
            room: None,
            date: None,
            start_time: None,
            end_time: None,
            teacher_name: None,
        };
        let _ = app.update(Message::OpenAttendanceModal(schedule));
        assert!(app.error_message.is_empty());
        assert!(app.status_message.is_empty());
        assert!(app.show_attendance_modal);
        assert!(app.attendance_loading);
    }

    fn saved_record(attendance_id: i64, student_id: i64, date: NaiveDate) -> AttendanceRecord {
        AttendanceRecord {
            attendance_id: Some(attendance_id),
            student_id,
            status: Some(AttendanceStatus::Absent),
            checkin_time: None,
            date,
        }
    }

    #[test]
    fn submission_splits_new_and_existing_records() {
        let date = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        // у студента 1 запись уже есть, у студента 2 — нет
        let records = vec![saved_record(77, 1, date)];
        let mut sheet =
            AttendanceSheet::build(vec![roster_entry(1), roster_entry(2)], &records, date);
        sheet.set_status(1, Some(AttendanceStatus::Present), None);
        sheet.set_status(2, Some(AttendanceStatus::Present), None);

        let now = "2025-09-01 09:00:00";
        let (batch, edits) = build_submission(&sheet, 7, now);
        assert_eq!(batch.schedule_id, 7);
        assert_eq!(batch.date, date);
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.records[0].student_id, 2);
        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].student_id, 1);
        assert_eq!(edits[0].schedule_id, 7);
        assert_eq!(edits[0].checkin_time.as_deref(), Some(now));
    }

    #[test]
    fn fresh_sheet_submits_one_batch_and_no_late_edits() {
        let date = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let mut sheet =
            AttendanceSheet::build(vec![roster_entry(1), roster_entry(2)], &[], date);
        sheet.mark_all_absent();

        let (batch, edits) = build_submission(&sheet, 7, "2025-09-01 09:00:00");
        assert_eq!(batch.records.len(), 2);
        assert!(edits.is_empty());
    }

    #[test]
    fn fully_saved_sheet_submits_empty_batch() {
        let date = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let records = vec![saved_record(10, 1, date), saved_record(11, 2, date)];
        let mut sheet =
            AttendanceSheet::build(vec![roster_entry(1), roster_entry(2)], &records, date);
        sheet.mark_all_absent();

        let (batch, edits) = build_submission(&sheet, 7, "2025-09-01 09:00:00");
        // пустой пакет не уходит на сервер, остаются только поздние отметки
        assert!(batch.records.is_empty());
        assert_eq!(edits.len(), 2);
    }

    #[test]
    fn validators_accept_expected_formats() {
        assert!(valid_email("ivanova@school.ru"));
        assert!(!valid_email("не почта"));
        assert!(valid_time("08:30"));
        assert!(!valid_time("8:30"));
        assert!(!valid_time("24:00"));
        assert!(valid_month("2025-09"));
        assert!(!valid_month("2025-13"));
        assert!(!valid_month("сентябрь"));
    }
}
