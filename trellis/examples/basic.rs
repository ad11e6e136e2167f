//! Basic example of the trellis container.
//!
//! Run with `RUST_LOG=trellis_container=debug cargo run --example basic`.

use std::rc::Rc;

use trellis::prelude::*;
use tracing_subscriber::EnvFilter;

// === Define your traits and types ===

trait Logger {
    fn log(&self, msg: &str);
}

struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log(&self, msg: &str) {
        println!("[LOG] {msg}");
    }
}

struct Config {
    database_url: String,
    debug: bool,
}

trait Database {
    fn query(&self, sql: &str) -> String;
}

struct Postgres {
    url: String,
    logger: Rc<dyn Logger>,
}

impl Database for Postgres {
    fn query(&self, sql: &str) -> String {
        self.logger.log(&format!("Executing: {sql}"));
        format!("Results from {}", self.url)
    }
}

impl Lifecycle for Postgres {
    fn on_created(&self) {
        self.logger.log("Connection pool opened");
    }

    fn on_will_destroy(&self) {
        self.logger.log("Connection pool closed");
    }
}

interface_set! { RepositoryDeps { dyn Database } }

struct UserRepository {
    deps: ContainerView<RepositoryDeps>,
}

impl UserRepository {
    fn find_user(&self, id: u64) -> Result<String> {
        let db = self.deps.resolve_raw::<dyn Database>()?;
        Ok(db.query(&format!("SELECT * FROM users WHERE id = {id}")))
    }
}

struct RequestContext {
    id: u32,
}

struct UserService {
    repo: Rc<UserRepository>,
    logger: Rc<dyn Logger>,
    request: Rc<RequestContext>,
}

impl UserService {
    fn get_user(&self, id: u64) -> Result<String> {
        self.logger
            .log(&format!("Request #{}: getting user {id}", self.request.id));
        self.repo.find_user(id)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Rc::new(Config {
        database_url: "postgres://localhost/myapp".to_string(),
        debug: true,
    });

    // Application-wide container
    let app = Container::builder()
        .register(Component::external(Rc::clone(&config)))
        .register(Component::new(|| Ok(ConsoleLogger)).provides::<dyn Logger>(|c| c))
        .register(
            Component::with_context(|r| {
                let config: Rc<Config> = r.resolve()?;
                Ok(Postgres {
                    url: config.database_url.clone(),
                    logger: r.resolve()?,
                })
            })
            .provides::<dyn Database>(|c| c)
            .depends_on::<Config>()
            .depends_on::<dyn Logger>()
            .with_lifecycle(),
        )
        .register(Component::with_view(|deps| Ok(UserRepository { deps })))
        .build()?;

    println!("Container built: {app:?}");
    println!("Config: database_url={}, debug={}", config.database_url, config.debug);

    // One container per request, layered over the application container
    for id in 1..=2u32 {
        let request = Container::builder()
            .base(&app)
            .register(Component::with_args(|id: u32| Ok(RequestContext { id })).bind_args(id))
            .register(
                Component::with_context(|r| {
                    Ok(UserService {
                        repo: r.resolve()?,
                        logger: r.resolve()?,
                        request: r.resolve()?,
                    })
                })
                .depends_on::<UserRepository>()
                .depends_on::<dyn Logger>()
                .depends_on::<RequestContext>(),
            )
            .build()?;

        let service = request.resolve::<UserService>()?;
        println!("{}", service.get_user(40 + u64::from(id))?);
        println!("Created in request: {:?}", request.creation_order());
    }

    println!("Created in app: {:?}", app.creation_order());
    Ok(())
}
