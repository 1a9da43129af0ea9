use std::sync::Arc;

use folio_di::Build;
use folio_templates_contracts::{Template, TemplateService, TEMPLATES};
use tera::Tera;

#[derive(Debug, Clone, Default, Build)]
pub struct TemplateServiceImpl {
    #[state]
    state: State,
}

#[derive(Debug, Clone)]
struct State(Arc<Tera>);

impl Default for State {
    fn default() -> Self {
        let mut tera = Tera::default();

        for &(name, template) in TEMPLATES {
            tera.add_raw_template(name, template).unwrap();
        }

        Self(tera.into())
    }
}

impl TemplateService for TemplateServiceImpl {
    fn render<T: Template>(&self, template: &T) -> anyhow::Result<String> {
        let context = tera::Context::from_serialize(template)?;
        self.state.0.render(T::NAME, &context).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use folio_templates_contracts::ContactFormTemplate;

    use super::*;

    fn contact_form() -> ContactFormTemplate {
        ContactFormTemplate {
            name: "Jane".into(),
            sender_email: "jane@x.com".into(),
            subject: "Hi".into(),
            message: "Hello".into(),
        }
    }

    #[test]
    fn contact_form_contains_fields() {
        // Arrange
        let sut = TemplateServiceImpl::default();

        // Act
        let result = sut.render(&contact_form()).unwrap();

        // Assert
        assert!(result.contains("<h1 style=\"color: #333333; font-size: 24px; font-weight: bold; margin: 30px 0; padding: 0;\">Hi</h1>"));
        assert!(result.contains("From: Jane (jane@x.com)"));
        assert!(result.contains(">Hello</p>"));
    }

    #[test]
    fn contact_form_escapes_user_input() {
        // Arrange
        let sut = TemplateServiceImpl::default();

        // Act
        let result = sut
            .render(&ContactFormTemplate {
                name: "<b>Jane</b>".into(),
                message: "<script>alert(1)</script>".into(),
                ..contact_form()
            })
            .unwrap();

        // Assert
        assert!(!result.contains("<script>"));
        assert!(!result.contains("<b>Jane</b>"));
        assert!(result.contains("&lt;script&gt;"));
        assert!(result.contains("&lt;b&gt;Jane"));
    }
}
