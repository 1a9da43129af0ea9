use folio_core_contact_impl::ContactServiceImpl;
use folio_email_impl::ResendEmailServiceImpl;
use folio_templates_impl::TemplateServiceImpl;

// API
pub type RestServer = folio_api_rest::RestServer<ContactFeature>;

// Email
pub type Email = ResendEmailServiceImpl;

// Template
pub type Template = TemplateServiceImpl;

// Core
pub type ContactFeature = ContactServiceImpl<Email, Template>;
