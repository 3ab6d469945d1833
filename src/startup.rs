use crate::configuration::Settings;
use crate::email_clients::EmailClient;
use crate::notifiers::{ContactNotifier, SubscribeNotifier};
use crate::routes::{contact, form_config, health_check, subscribe, FormRules};
use std::net::TcpListener;

use actix_files::Files;
use actix_web::{dev::Server, web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub fn build(configurations: Settings) -> Result<Self, anyhow::Error> {
        let sender = configurations
            .email_client
            .sender()
            .map_err(anyhow::Error::msg)
            .context("Invalid sender email.")?;
        let timeout = configurations.email_client.timeout();
        let email_client = EmailClient::new(
            configurations.email_client.base_url,
            sender,
            configurations.email_client.authorization_token,
            timeout,
        )
        .context("Failed to build the email client.")?;

        let contact_notifier = ContactNotifier::new(email_client, &configurations.contact)
            .map_err(anyhow::Error::msg)
            .context("Invalid administrator email.")?;
        let subscribe_notifier = SubscribeNotifier::from_settings(&configurations.mailing_list)
            .context("Failed to build the mailing list client.")?;

        let addr_to_bind = format!(
            "{}:{}",
            configurations.application.host, configurations.application.port
        );
        let listener = TcpListener::bind(&addr_to_bind)
            .with_context(|| format!("Failed to bind {}.", addr_to_bind))?;
        let port = listener.local_addr()?.port();

        let server = run(
            listener,
            contact_notifier,
            subscribe_notifier,
            configurations.application.static_dir,
        )?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    contact_notifier: ContactNotifier,
    subscribe_notifier: SubscribeNotifier,
    static_dir: Option<String>,
) -> Result<Server, anyhow::Error> {
    let form_rules = web::Data::new(FormRules::new()?);
    let contact_notifier = web::Data::new(contact_notifier);
    let subscribe_notifier = web::Data::new(subscribe_notifier);

    let server = HttpServer::new(move || {
        let app = App::new()
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .route("/contact", web::post().to(contact))
            .route("/subscribe", web::post().to(subscribe))
            .app_data(form_config())
            .app_data(form_rules.clone())
            .app_data(contact_notifier.clone())
            .app_data(subscribe_notifier.clone());

        // the site pages go last so they never shadow the form endpoints
        match &static_dir {
            Some(dir) => app.service(Files::new("/", dir).index_file("index.html")),
            None => app,
        }
    })
    .listen(listener)?
    .run();

    Ok(server)
}
