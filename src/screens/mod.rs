use iced::widget::{Column, text};

use crate::app::{App, Message};

pub mod login;
pub mod nav_menu;
pub mod profile;
pub mod settings;
pub mod users;
pub mod classes;
pub mod schedules;
pub mod tuition;
pub mod payroll;
pub mod reviews;
pub mod evaluations;

pub use login::login_screen;
pub use nav_menu::nav_menu;
pub use profile::profile_screen;
pub use settings::settings_screen;
pub use users::users_screen;
pub use classes::classes_screen;
pub use schedules::schedules_screen;
pub use tuition::tuition_screen;
pub use payroll::payroll_screen;
pub use reviews::reviews_screen;
pub use evaluations::evaluations_screen;

/// Уведомления под заголовком экрана: ошибка и статус последней операции.
pub fn notice_bar(app: &App) -> Column<Message> {
    let mut bar = Column::new().spacing(5);
    if !app.error_message.is_empty() {
        bar = bar.push(text(&app.error_message).style(text::danger));
    }
    if !app.status_message.is_empty() {
        bar = bar.push(text(&app.status_message).style(text::success));
    }
    bar
}
