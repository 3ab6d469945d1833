pub mod configuration;
pub mod domain;
pub mod email_clients;
pub mod mailing_list_client;
pub mod notifiers;
pub mod routes;
pub mod startup;
pub mod submitter;
pub mod telemetry;
pub mod templating;
