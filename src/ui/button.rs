use crate::ui::templates::{self, BUTTON};
use crate::utils::error::Result;
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
}

impl ButtonVariant {
    pub fn class_name(&self) -> &'static str {
        match self {
            ButtonVariant::Primary => "primary",
            ButtonVariant::Secondary => "secondary",
        }
    }
}

/// Styled button. Has no behaviour of its own beyond reporting clicks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub variant: ButtonVariant,
    pub disabled: bool,
    pub class_name: String,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            variant: ButtonVariant::default(),
            disabled: false,
            class_name: String::new(),
        }
    }

    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    /// Notifies `on_click` unless the button is disabled. Returns whether it fired.
    pub fn click<F: FnOnce()>(&self, on_click: F) -> bool {
        if self.disabled {
            return false;
        }
        on_click();
        true
    }

    pub(crate) fn template_data(&self) -> Value {
        let mut classes = format!("button {}", self.variant.class_name());
        if !self.class_name.is_empty() {
            classes.push(' ');
            classes.push_str(&self.class_name);
        }

        json!({
            "classes": classes,
            "disabled": self.disabled,
            "label": self.label,
        })
    }

    pub fn render_html(&self) -> Result<String> {
        templates::render(BUTTON, &self.template_data())
    }
}

pub fn basket_button_label(selected_count: usize) -> String {
    match selected_count {
        0 => "Select items to add".to_string(),
        1 => "Add 1 item to basket".to_string(),
        n => format!("Add {} items to basket", n),
    }
}

/// The bundle's call to action; disabled while nothing is selected.
pub fn basket_button(selected_count: usize) -> Button {
    Button::new(basket_button_label(selected_count)).disabled(selected_count == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basket_label_policy() {
        assert_eq!(basket_button_label(0), "Select items to add");
        assert_eq!(basket_button_label(1), "Add 1 item to basket");
        assert_eq!(basket_button_label(2), "Add 2 items to basket");
        assert_eq!(basket_button_label(17), "Add 17 items to basket");
    }

    #[test]
    fn test_basket_button_disabled_iff_empty() {
        for count in 0..5 {
            let button = basket_button(count);
            assert_eq!(button.disabled, count == 0);
            assert_eq!(button.label, basket_button_label(count));
        }
    }

    #[test]
    fn test_click_respects_disabled() {
        let mut clicks = 0;
        assert!(!Button::new("x").disabled(true).click(|| clicks += 1));
        assert!(Button::new("x").click(|| clicks += 1));
        assert_eq!(clicks, 1);
    }

    #[test]
    fn test_render_html() {
        let html = Button::new("Add 2 items to basket")
            .variant(ButtonVariant::Secondary)
            .class_name("wide")
            .render_html()
            .unwrap();
        assert_eq!(
            html,
            r#"<button type="button" class="button secondary wide">Add 2 items to basket</button>"#
        );

        let html = basket_button(0).render_html().unwrap();
        assert!(html.contains(" disabled>"));
        assert!(html.contains("class=\"button primary\""));
    }
}
