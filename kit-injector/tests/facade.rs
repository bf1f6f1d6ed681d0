use std::sync::Arc;

use kit_injector::testing::TestInjector;
use kit_injector::{
    expect, named, provide, provide_instance, Arguments, Container, Dependencies, InjectError,
    Injectable, InjectorConfig, Interfaces, Requirement, Scope,
};

trait Greeter: Send + Sync {
    fn greet(&self) -> String;
}

struct English;

impl Greeter for English {
    fn greet(&self) -> String {
        "hello".to_string()
    }
}

impl Injectable for English {
    fn interfaces() -> Interfaces<Self> {
        Interfaces::new().implements::<dyn Greeter>(|this| this)
    }

    fn construct(_args: &mut Arguments) -> Result<Self, InjectError> {
        Ok(English)
    }
}

struct French;

impl Greeter for French {
    fn greet(&self) -> String {
        "bonjour".to_string()
    }
}

struct Session;

impl Injectable for Session {
    fn scope() -> Scope {
        Scope::Singleton
    }

    fn construct(_args: &mut Arguments) -> Result<Self, InjectError> {
        Ok(Session)
    }
}

struct Welcome {
    greeter: Arc<dyn Greeter>,
    french: Arc<dyn Greeter>,
}

impl Injectable for Welcome {
    fn dependencies() -> Dependencies {
        Dependencies::new()
            .with("greeter", Requirement::<dyn Greeter>::interface())
            .with("french", named!("fr", dyn Greeter))
    }

    fn construct(args: &mut Arguments) -> Result<Self, InjectError> {
        Ok(Welcome {
            greeter: args.param("greeter")?,
            french: args.param("french")?,
        })
    }
}

#[test]
fn test_facade_with_declarative_macros() {
    let _guard = TestInjector::fake();

    provide!(dyn Greeter => English).unwrap();
    provide_instance!(dyn Greeter, French, "fr").unwrap();

    let welcome = Container::make::<Welcome>(None).unwrap();
    expect!(welcome.greeter.greet()).to_equal("hello".to_string());
    expect!(welcome.french.greet()).to_equal("bonjour".to_string());
}

#[test]
fn test_facade_construct_with_override() {
    let _guard = TestInjector::fake();
    provide!(dyn Greeter => English).unwrap();
    provide_instance!(dyn Greeter, French, "fr").unwrap();
    let pirate: Arc<dyn Greeter> = Arc::new(French);

    let welcome = Container::construct::<Welcome>(Arguments::new().with("greeter", pirate.clone()))
        .unwrap();
    expect!(welcome.greeter.clone()).to_be_same_instance(&pirate);
}

#[test]
fn test_facade_resolve_named_requirement() {
    let _guard = TestInjector::fake();
    provide_instance!(dyn Greeter, French, "fr").unwrap();

    let greeter = Container::resolve(&named("fr", Requirement::<dyn Greeter>::interface()), None)
        .unwrap();
    expect!(greeter.greet()).to_equal("bonjour".to_string());
    expect!(Container::has_binding::<dyn Greeter>(None)).to_be_false();
}

#[test]
fn test_facade_errors() {
    let _guard = TestInjector::fake();

    expect!(Container::get_instance::<dyn Greeter>(Some("nowhere")))
        .to_fail_with(InjectError::unknown_qualifier("nowhere"));
    expect!(Container::get_instance::<dyn Greeter>(None)).to_be_lookup_error();
}

#[test]
fn test_each_fake_starts_empty() {
    {
        let _guard = TestInjector::fake();
        provide!(dyn Greeter => English).unwrap();
        expect!(Container::has_binding::<dyn Greeter>(None)).to_be_true();
    }

    let _guard = TestInjector::fake();
    expect!(Container::has_binding::<dyn Greeter>(None)).to_be_false();
}

#[test]
fn test_fake_with_strict_config() {
    let _guard = TestInjector::fake_with(InjectorConfig::builder().strict(true).build());

    expect!(Container::make::<English>(None)).to_be_lookup_error();
    provide!(English => English).unwrap();
    expect!(Container::make::<English>(None)).to_be_ok();
}

#[test]
fn test_reset_singletons_through_facade() {
    let _guard = TestInjector::fake();
    let first = Container::make::<Session>(None).unwrap();
    expect!(Container::make::<Session>(None).unwrap()).to_be_same_instance(&first);

    expect!(Container::reset_singletons()).to_equal(Ok(1));
    let injector = TestInjector::current().unwrap();
    expect!(injector.has_singleton::<Session>()).to_be_false();

    let rebuilt = Container::make::<Session>(None).unwrap();
    expect!(rebuilt).to_not_be_same_instance(&first);
}

#[test]
fn test_global_injector_without_fake() {
    expect!(TestInjector::current().is_none()).to_be_true();

    // The process-wide injector is shared, so bind under a qualifier no other test uses
    provide_instance!(dyn Greeter, French, "facade-global").unwrap();

    let greeter = Container::get_instance::<dyn Greeter>(Some("facade-global")).unwrap();
    expect!(greeter.greet()).to_equal("bonjour".to_string());
    expect!(Container::has_binding::<dyn Greeter>(Some("facade-global"))).to_be_true();
    expect!(Container::init().has_qualifier("facade-global")).to_be_true();
}
