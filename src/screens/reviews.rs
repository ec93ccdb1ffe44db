use iced::{widget::{Button, Column, Container, Row, Stack, Text, TextInput, mouse_area, Scrollable}, Alignment, Color, Length};
use iced::widget::container::{background, bordered_box};
use iced::widget::{horizontal_space, text, PickList};
use iced_font_awesome::fa_icon_solid;

use crate::app::{App, Message};
use crate::screens::notice_bar;

const RATINGS: [i32; 5] = [1, 2, 3, 4, 5];

fn stars(rating: i32) -> String {
    "★".repeat(rating.clamp(0, 5) as usize)
}

pub fn reviews_screen(app: &App) -> Container<Message> {
    let needle = app.review_filter_text.trim().to_lowercase();
    let filtered: Vec<_> = app
        .reviews
        .iter()
        .filter(|r| {
            let text_ok = needle.is_empty() || r.teacher_name.to_lowercase().contains(&needle);
            let rating_ok = app.review_min_rating.is_none_or(|min| r.rating >= min);
            text_ok && rating_ok
        })
        .collect();

    let header = Row::new()
        .push(Text::new("Отзывы о преподавателях").size(30))
        .push(horizontal_space())
        .push(
            Button::new(fa_icon_solid("plus").style(move |_| text::base(&app.theme)))
                .on_press(Message::OpenReviewModal(None)),
        )
        .align_y(Alignment::Center)
        .width(Length::Fill);

    let filter_row = Row::new()
        .push(
            TextInput::new("Поиск по преподавателю", &app.review_filter_text)
                .on_input(Message::ReviewFilterChanged)
                .width(Length::Fixed(250.0)),
        )
        .push(
            PickList::new(RATINGS, app.review_min_rating, Message::ReviewMinRatingChanged)
                .placeholder("Оценка от"),
        )
        .push(Button::new(Text::new("Сбросить")).on_press(Message::ClearReviewRatingFilter))
        .spacing(10)
        .align_y(Alignment::Center);

    let mut list = Column::new().spacing(15);
    for review in filtered {
        let actions = Row::new()
            .push(
                Button::new(Text::new("Редактировать"))
                    .on_press(Message::OpenReviewModal(Some(review.clone()))),
            )
            .push(horizontal_space())
            .push(Button::new(Text::new("X")).on_press(Message::AskDeleteReview(review.clone())))
            .width(Length::Fill);

        let mut info = Column::new()
            .spacing(5)
            .push(Text::new(review.teacher_name.clone()).size(18))
            .push(Text::new(format!(
                "Оценка: {} ({})",
                stars(review.rating),
                review.rating
            )));
        if let Some(comment) = &review.comment {
            info = info.push(Text::new(comment.clone()));
        }
        if let Some(author) = &review.author_name {
            info = info.push(Text::new(format!("Автор: {author}")).size(14));
        }
        if let Some(date) = review.date {
            info = info.push(Text::new(format!("{date}")).size(14));
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

    if app.show_review_modal {
        let title = if app.editing_review_id.is_some() {
            "Редактирование отзыва"
        } else {
            "Новый отзыв"
        };
        let mut form = Column::new()
            .spacing(10)
            .push(Text::new(title).size(24))
            .push(
                PickList::new(
                    app.teachers(),
                    app.review_form_teacher.clone(),
                    Message::ReviewFormTeacherChanged,
                )
                .placeholder("Преподаватель"),
            )
            .push(
                PickList::new(RATINGS, app.review_form_rating, Message::ReviewFormRatingChanged)
                    .placeholder("Оценка"),
            )
            .push(
                TextInput::new("Комментарий", &app.review_form_comment)
                    .on_input(Message::ReviewFormCommentChanged),
            );
        if let Some(error) = &app.review_form_error {
            form = form.push(text(error.clone()).style(text::danger));
        }
        let form = form.push(
            Row::new()
                .spacing(10)
                .push(Button::new(Text::new("Сохранить")).on_press(Message::SubmitReviewForm))
                .push(Button::new(Text::new("Отмена")).on_press(Message::CloseReviewModal)),
        );

        let modal = Container::new(form)
            .padding(20)
            .width(Length::Fixed(450.0))
            .style(move |_| bordered_box(&app.theme));
        let overlay = Container::new(
            mouse_area(Container::new(modal).center(Length::Fill))
                .on_press(Message::CloseReviewModal),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .style(move |_| background(Color { r: 0.0, g: 0.0, b: 0.0, a: 0.7 }));
        ui_stack = ui_stack.push(overlay);
    }

    if let Some(review) = &app.confirm_delete_review {
        let dialog = Column::new()
            .spacing(15)
            .push(
                Text::new(format!(
                    "Удалить отзыв о преподавателе «{}»?",
                    review.teacher_name
                ))
                .size(20),
            )
            .push(
                Row::new()
                    .spacing(10)
                    .push(Button::new(Text::new("Удалить")).on_press(Message::ConfirmDeleteReview))
                    .push(Button::new(Text::new("Отмена")).on_press(Message::CancelDeleteReview)),
            );
        let modal = Container::new(dialog)
            .padding(20)
            .style(move |_| bordered_box(&app.theme));
        let overlay = Container::new(
            mouse_area(Container::new(modal).center(Length::Fill))
                .on_press(Message::CancelDeleteReview),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .style(move |_| background(Color { r: 0.0, g: 0.0, b: 0.0, a: 0.7 }));
        ui_stack = ui_stack.push(overlay);
    }

    Container::new(ui_stack)
        .width(Length::Fill)
        .height(Length::Fill)
}
