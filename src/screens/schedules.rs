use iced::{widget::{Button, Column, Container, Row, Stack, Text, TextInput, mouse_area, Scrollable}, Alignment, Color, Length};
use iced::widget::container::{background, bordered_box};
use iced::widget::{horizontal_space, text, PickList};
use iced_aw::date_picker;
use iced_aw::date_picker::Date;
use iced_font_awesome::fa_icon_solid;

use crate::api::types::AttendanceStatus;
use crate::app::{App, DatePickerOpen, Message};
use crate::screens::notice_bar;

const STATUSES: [AttendanceStatus; 2] = [AttendanceStatus::Present, AttendanceStatus::Absent];

fn date_label(date: Date) -> String {
    format!("{:04}-{:02}-{:02}", date.year, date.month, date.day)
}

pub fn schedules_screen(app: &App) -> Container<Message> {
    let needle = app.schedule_filter_text.trim().to_lowercase();
    let filtered: Vec<_> = app
        .schedules
        .iter()
        .filter(|s| {
            needle.is_empty()
                || s.class_name
                    .as_deref()
                    .is_some_and(|n| n.to_lowercase().contains(&needle))
                || s.teacher_name
                    .as_deref()
                    .is_some_and(|n| n.to_lowercase().contains(&needle))
        })
        .collect();

    let header = Row::new()
        .push(Text::new("Расписание").size(30))
        .push(horizontal_space())
        .push(
            Button::new(fa_icon_solid("plus").style(move |_| text::base(&app.theme)))
                .on_press(Message::OpenScheduleModal(None)),
        )
        .align_y(Alignment::Center)
        .width(Length::Fill);

    // дата, за которую будет открыт табель посещаемости
    let attendance_date_button = date_picker(
        app.date_picker_open == DatePickerOpen::AttendanceDate && !app.show_attendance_modal,
        app.attendance_date,
        Button::new(Text::new(date_label(app.attendance_date)))
            .on_press(Message::OpenDatePicker(DatePickerOpen::AttendanceDate)),
        Message::CancelDatePicker,
        Message::DatePicked,
    );

    let filter_row = Row::new()
        .push(
            TextInput::new("Поиск по классу или преподавателю", &app.schedule_filter_text)
                .on_input(Message::ScheduleFilterChanged)
                .width(Length::Fixed(300.0)),
        )
        .push(horizontal_space())
        .push(Text::new("Дата табеля:"))
        .push(attendance_date_button)
        .spacing(10)
        .align_y(Alignment::Center);

    let mut list = Column::new().spacing(15);
    for schedule in filtered {
        let actions = Row::new()
            .spacing(10)
            .push(
                Button::new(Text::new("Посещаемость"))
                    .on_press(Message::OpenAttendanceModal(schedule.clone())),
            )
            .push(
                Button::new(Text::new("Редактировать"))
                    .on_press(Message::OpenScheduleModal(Some(schedule.clone()))),
            )
            .push(horizontal_space())
            .push(
                Button::new(Text::new("X")).on_press(Message::AskDeleteSchedule(schedule.clone())),
            )
            .width(Length::Fill);

        let mut info = Column::new()
            .spacing(5)
            .push(
                Text::new(
                    schedule
                        .class_name
                        .clone()
                        .unwrap_or_else(|| format!("Занятие №{}", schedule.id)),
                )
                .size(18),
            );
        if let Some(date) = schedule.date {
            info = info.push(Text::new(format!("Дата: {date}")));
        }
        if let (Some(start), Some(end)) = (&schedule.start_time, &schedule.end_time) {
            info = info.push(Text::new(format!("Время: {start} – {end}")));
        }
        if let Some(room) = &schedule.room {
            info = info.push(Text::new(format!("Кабинет: {room}")));
        }
        if let Some(teacher) = &schedule.teacher_name {
            info = info.push(Text::new(format!("Преподаватель: {teacher}")));
        }

        list = list.push(
            Container::new(Column::new().push(actions).push(info).spacing(10))
                .padding(10)
                .style(move |_| bordered_box(&app.theme))
                .width(Length::Fill),
        );
    }

    let base = Column::new()
        .push(header)
        .push(notice_bar(app))
        .push(filter_row)
        .push(Scrollable::new(list).height(Length::Fill))
        .spacing(15)
        .padding(20);

    let mut ui_stack = Stack::new().push(base);

    if app.show_schedule_modal {
        ui_stack = ui_stack.push(schedule_form_modal(app));
    }

    if let Some(schedule) = &app.confirm_delete_schedule {
        let name = schedule
            .class_name
            .clone()
            .unwrap_or_else(|| format!("№{}", schedule.id));
        let dialog = Column::new()
            .spacing(15)
            .push(Text::new(format!("Удалить занятие «{name}»?")).size(20))
            .push(
                Row::new()
                    .spacing(10)
                    .push(
                        Button::new(Text::new("Удалить")).on_press(Message::ConfirmDeleteSchedule),
                    )
                    .push(
                        Button::new(Text::new("Отмена")).on_press(Message::CancelDeleteSchedule),
                    ),
            );
        let modal = Container::new(dialog)
            .padding(20)
            .style(move |_| bordered_box(&app.theme));
        let overlay = Container::new(
            mouse_area(Container::new(modal).center(Length::Fill))
                .on_press(Message::CancelDeleteSchedule),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .style(move |_| background(Color { r: 0.0, g: 0.0, b: 0.0, a: 0.7 }));
        ui_stack = ui_stack.push(overlay);
    }

    if app.show_attendance_modal {
        ui_stack = ui_stack.push(attendance_modal(app));
    }

    Container::new(ui_stack)
        .width(Length::Fill)
        .height(Length::Fill)
}

fn schedule_form_modal(app: &App) -> Container<Message> {
    let title = if app.editing_schedule_id.is_some() {
        "Редактирование занятия"
    } else {
        "Новое занятие"
    };
    let form_date_button = date_picker(
        app.date_picker_open == DatePickerOpen::ScheduleForm,
        app.schedule_form_date,
        Button::new(Text::new(date_label(app.schedule_form_date)))
            .on_press(Message::OpenDatePicker(DatePickerOpen::ScheduleForm)),
        Message::CancelDatePicker,
        Message::DatePicked,
    );

    let mut form = Column::new()
        .spacing(10)
        .push(Text::new(title).size(24))
        .push(
            PickList::new(
                app.classes.clone(),
                app.schedule_form_class.clone(),
                Message::ScheduleFormClassChanged,
            )
            .placeholder("Класс"),
        )
        .push(
            Row::new()
                .spacing(10)
                .align_y(Alignment::Center)
                .push(Text::new("Дата:"))
                .push(form_date_button),
        )
        .push(
            TextInput::new("Начало (ЧЧ:ММ)", &app.schedule_form_start)
                .on_input(Message::ScheduleFormStartChanged),
        )
        .push(
            TextInput::new("Окончание (ЧЧ:ММ)", &app.schedule_form_end)
                .on_input(Message::ScheduleFormEndChanged),
        )
        .push(
            TextInput::new("Кабинет", &app.schedule_form_room)
                .on_input(Message::ScheduleFormRoomChanged),
        );
    if let Some(error) = &app.schedule_form_error {
        form = form.push(text(error.clone()).style(text::danger));
    }
    let form = form.push(
        Row::new()
            .spacing(10)
            .push(Button::new(Text::new("Сохранить")).on_press(Message::SubmitScheduleForm))
            .push(Button::new(Text::new("Отмена")).on_press(Message::CloseScheduleModal)),
    );

    let modal = Container::new(form)
        .padding(20)
        .width(Length::Fixed(450.0))
        .style(move |_| bordered_box(&app.theme));
    Container::new(
        mouse_area(Container::new(modal).center(Length::Fill))
            .on_press(Message::CloseScheduleModal),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .style(move |_| background(Color { r: 0.0, g: 0.0, b: 0.0, a: 0.7 }))
}

fn attendance_modal(app: &App) -> Container<Message> {
    let title = format!(
        "Посещаемость: {} ({})",
        app.attendance_class_name,
        date_label(app.attendance_date)
    );
    let mut content = Column::new().spacing(15).push(Text::new(title).size(24));

    if !app.error_message.is_empty() {
        content = content.push(text(&app.error_message).style(text::danger));
    }

    if app.attendance_loading {
        content = content.push(Text::new("Загрузка..."));
    } else if let Some(sheet) = &app.attendance_sheet {
        if sheet.roster().is_empty() {
            content = content.push(Text::new("В классе нет студентов"));
        } else {
            let mut rows = Column::new().spacing(10);
            for student in sheet.roster() {
                let student_id = student.student_id;
                let draft = sheet.draft(student_id);
                let status = draft.and_then(|d| d.status);
                let saved = draft.is_some_and(|d| d.attendance_id.is_some());

                let mut row = Row::new()
                    .spacing(10)
                    .align_y(Alignment::Center)
                    .push(Text::new(student.name.clone()).width(Length::Fixed(260.0)))
                    .push(
                        PickList::new(STATUSES, status, move |s| {
                            Message::SetAttendanceStatus(student_id, Some(s))
                        })
                        .placeholder("Не отмечен"),
                    )
                    .push(
                        Button::new(Text::new("Сбросить"))
                            .on_press(Message::SetAttendanceStatus(student_id, None)),
                    );
                if let Some(checkin) = draft.and_then(|d| d.checkin_time.clone()) {
                    row = row.push(Text::new(format!("Пришёл: {checkin}")).size(14));
                }
                if saved {
                    // запись уже есть на сервере, отправка пойдёт путём
                    // поздней отметки
                    row = row.push(Text::new("сохранено").size(14));
                }
                rows = rows.push(row);
            }
            content = content.push(Scrollable::new(rows).height(Length::Fixed(360.0)));

            let submit_label = if app.attendance_submitting {
                "Сохранение..."
            } else {
                "Сохранить"
            };
            let can_submit = sheet.is_ready() && !app.attendance_submitting;
            content = content.push(
                Row::new()
                    .spacing(10)
                    .push(
                        Button::new(Text::new("Отметить всех отсутствующими"))
                            .on_press(Message::MarkAllAbsent),
                    )
                    .push(horizontal_space())
                    .push(
                        Button::new(Text::new(submit_label))
                            .on_press_maybe(can_submit.then_some(Message::SubmitAttendance)),
                    )
                    .push(
                        Button::new(Text::new("Закрыть"))
                            .on_press(Message::CloseAttendanceModal),
                    ),
            );
        }
    } else {
        content = content.push(Text::new("Не удалось загрузить табель"));
    }

    if app.attendance_loading
        || app
            .attendance_sheet
            .as_ref()
            .is_none_or(|s| s.roster().is_empty())
    {
        content = content.push(
            Button::new(Text::new("Закрыть")).on_press(Message::CloseAttendanceModal),
        );
    }

    let modal = Container::new(content)
        .padding(20)
        .width(Length::Fixed(640.0))
        .style(move |_| bordered_box(&app.theme));
    Container::new(
        mouse_area(Container::new(modal).center(Length::Fill))
            .on_press(Message::CloseAttendanceModal),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .style(move |_| background(Color { r: 0.0, g: 0.0, b: 0.0, a: 0.7 }))
}
