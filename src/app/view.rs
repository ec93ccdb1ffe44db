use iced::Length;
use iced::widget::{Column, Container, Row};
use crate::app::state::Screen;
use crate::screens::{classes_screen, evaluations_screen, login_screen, nav_menu, payroll_screen, profile_screen, reviews_screen, schedules_screen, settings_screen, tuition_screen, users_screen};
use super::{App, Message};

impl App {
    pub fn view(&self) -> Row<Message> {
        Row::new()
            .spacing(20)
            .push(
                // Левое меню (sidebar)
                if self.current_screen != Screen::Login {
                    Container::new(nav_menu(self))
                        .width(Length::Fixed(220.0))
                        .height(Length::Fill)
                        .padding(10)
                } else {
                    Container::new(Column::new())
                        .width(Length::Fixed(0.0))
                        .height(Length::Fill)
                }
            )
            .push(
                // Основной контент
                match &self.current_screen {
                    Screen::Login => login_screen(self),
                    Screen::Profile => profile_screen(self),
                    Screen::Settings => settings_screen(self),
                    Screen::Users => users_screen(self),
                    Screen::Classes => classes_screen(self),
                    Screen::Schedules => schedules_screen(self),
                    Screen::Tuition => tuition_screen(self),
                    Screen::Payroll => payroll_screen(self),
                    Screen::Reviews => reviews_screen(self),
                    Screen::Evaluations => evaluations_screen(self),
                }
                    .width(Length::Fill),
            )
    }
}
