//! Small shared form and layout components.

use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Danger,
    Ghost,
}

impl ButtonVariant {
    fn class(self) -> &'static str {
        match self {
            ButtonVariant::Primary => "bg-emerald-600 text-white hover:bg-emerald-500",
            ButtonVariant::Secondary => {
                "bg-neutral-800 text-neutral-200 border border-neutral-700 hover:bg-neutral-700"
            }
            ButtonVariant::Danger => "bg-red-600 text-white hover:bg-red-500",
            ButtonVariant::Ghost => "bg-transparent text-neutral-400 hover:text-neutral-200",
        }
    }
}

#[component]
pub fn Button(
    #[props(default)] variant: ButtonVariant,
    #[props(default = "".to_string())] class: String,
    #[props(default = "button".to_string())] r#type: String,
    #[props(default = false)] disabled: bool,
    #[props(default)] onclick: EventHandler<MouseEvent>,
    children: Element,
) -> Element {
    rsx! {
        button {
            class: "px-4 py-2 rounded text-sm font-medium transition-colors disabled:opacity-50 disabled:cursor-not-allowed {variant.class()} {class}",
            r#type: r#type.clone(),
            disabled,
            onclick: move |evt| onclick.call(evt),
            {children}
        }
    }
}

#[component]
pub fn Input(
    #[props(default = "".to_string())] class: String,
    #[props(default = "text".to_string())] r#type: String,
    #[props(default = "".to_string())] placeholder: String,
    value: String,
    oninput: EventHandler<FormEvent>,
) -> Element {
    rsx! {
        input {
            class: "px-3 py-2 rounded bg-neutral-900 border border-neutral-700 text-neutral-100 text-sm placeholder-neutral-500 focus:outline-none focus:border-emerald-500 {class}",
            r#type: r#type.clone(),
            placeholder: "{placeholder}",
            value: "{value}",
            oninput: move |evt| oninput.call(evt),
        }
    }
}

#[component]
pub fn TextArea(
    #[props(default = "".to_string())] class: String,
    #[props(default = "".to_string())] placeholder: String,
    #[props(default = 4)] rows: i64,
    value: String,
    oninput: EventHandler<FormEvent>,
) -> Element {
    rsx! {
        textarea {
            class: "px-3 py-2 rounded bg-neutral-900 border border-neutral-700 text-neutral-100 text-sm placeholder-neutral-500 focus:outline-none focus:border-emerald-500 resize-y {class}",
            placeholder: "{placeholder}",
            rows,
            value: "{value}",
            oninput: move |evt| oninput.call(evt),
        }
    }
}

#[component]
pub fn Card(#[props(default = "".to_string())] class: String, children: Element) -> Element {
    rsx! {
        div {
            class: "bg-neutral-900 border border-neutral-800 rounded-lg p-6 {class}",
            {children}
        }
    }
}
