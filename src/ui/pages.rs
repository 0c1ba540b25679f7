/// Static informational pages
///
/// Home, Get Started, About and Contact carry no workflow logic; they
/// render localized copy and navigation into the detect page.

use iced::widget::{button, column, container, row, text};
use iced::{Alignment, Element, Length};

use crate::i18n::Strings;
use crate::{Message, Page};

/// Landing page: hero copy, three feature cards, and a pointer to the
/// onboarding page
pub fn home(strings: &'static Strings) -> Element<'static, Message> {
    let hero = column![
        text(strings.welcome).size(40),
        text(strings.subtitle).size(20).style(text::secondary),
        row![
            button(strings.start_detection)
                .on_press(Message::Navigate(Page::Detect))
                .style(button::success)
                .padding(12),
            button(strings.about)
                .on_press(Message::Navigate(Page::About))
                .style(button::secondary)
                .padding(12),
        ]
        .spacing(16),
    ]
    .spacing(16)
    .align_x(Alignment::Center);

    let features = row![
        feature_card("🔍", strings.accurate_detection, strings.ai_desc),
        feature_card("⚡", strings.quick_results, strings.results_desc),
        feature_card("📊", strings.detailed_analysis, strings.ai_desc),
    ]
    .spacing(20);

    let info = column![
        text(strings.welcome).size(24),
        text(strings.ai_desc),
        button(text(format!("{} →", strings.get_started)))
            .on_press(Message::Navigate(Page::GetStarted))
            .style(button::text),
    ]
    .spacing(10)
    .align_x(Alignment::Center);

    page(column![hero, features, info].spacing(48).align_x(Alignment::Center).into())
}

/// Onboarding page: the three numbered steps and the call to action.
/// The navbar is hidden here; the only ways out are the buttons.
pub fn get_started(strings: &'static Strings) -> Element<'static, Message> {
    let steps = row![
        step_card("1", strings.upload_image, strings.upload_desc),
        step_card("2", strings.ai_analysis, strings.ai_desc),
        step_card("3", strings.get_results, strings.results_desc),
    ]
    .spacing(20);

    let highlights = row![
        text(format!("🔍 {}", strings.accurate_detection)),
        text(format!("⚡ {}", strings.quick_results)),
        text(format!("📊 {}", strings.detailed_analysis)),
    ]
    .spacing(24);

    page(
        column![
            text(strings.welcome).size(40),
            text(strings.subtitle).size(20).style(text::secondary),
            steps,
            highlights,
            button(strings.start_detection)
                .on_press(Message::Navigate(Page::Detect))
                .style(button::success)
                .padding(14),
            text(strings.no_registration).size(14).style(text::secondary),
        ]
        .spacing(32)
        .align_x(Alignment::Center)
        .into(),
    )
}

pub fn about(_strings: &'static Strings) -> Element<'static, Message> {
    page(
        column![
            text("About Plant Disease Detection").size(36),
            section(
                "Our Mission",
                "Our application helps farmers and researchers detect plant diseases using \
                 AI-powered tools. Upload an image of your plant, and our system will analyze \
                 it to provide accurate results.",
            ),
            section(
                "Our Vision",
                "We aim to revolutionize agriculture by providing accessible and accurate tools \
                 for plant disease detection, ensuring better yields and healthier plants.",
            ),
            section(
                "AI-Powered Detection",
                "Analyze plant images with advanced AI algorithms for accurate results.",
            ),
            section(
                "Real-Time Analysis",
                "Get instant feedback on plant health and potential diseases.",
            ),
        ]
        .spacing(28)
        .align_x(Alignment::Center)
        .into(),
    )
}

pub fn contact(strings: &'static Strings) -> Element<'static, Message> {
    page(
        column![
            text(strings.contact).size(36),
            text("support@plantdisease.example"),
            text("Questions about plant disease detection? Reach out and we will get back to you."),
        ]
        .spacing(16)
        .align_x(Alignment::Center)
        .into(),
    )
}

fn page(content: Element<'static, Message>) -> Element<'static, Message> {
    container(content)
        .width(Length::Fill)
        .center_x(Length::Fill)
        .padding(40)
        .into()
}

fn feature_card(
    icon: &'static str,
    title: &'static str,
    body: &'static str,
) -> Element<'static, Message> {
    container(
        column![text(icon).size(32), text(title).size(18), text(body).size(14)]
            .spacing(8)
            .align_x(Alignment::Center),
    )
    .padding(20)
    .width(Length::Fixed(240.0))
    .style(container::rounded_box)
    .into()
}

fn step_card(
    number: &'static str,
    title: &'static str,
    body: &'static str,
) -> Element<'static, Message> {
    container(
        column![text(number).size(28), text(title).size(18), text(body).size(14)]
            .spacing(8)
            .align_x(Alignment::Center),
    )
    .padding(20)
    .width(Length::Fixed(240.0))
    .style(container::bordered_box)
    .into()
}

fn section(title: &'static str, body: &'static str) -> Element<'static, Message> {
    column![text(title).size(22), text(body).size(15)]
        .spacing(8)
        .width(Length::Fixed(640.0))
        .into()
}
