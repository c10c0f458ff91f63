//! Steps that load resolver settings inside a `figment::Jail`.

use anyhow::{Result, anyhow, ensure};
use camino::Utf8Path;
use locale_resolver::ResolverSettings;
use rstest_bdd_macros::{given, then, when};
use test_helpers::figment::{with_jail, write_store};
use test_helpers::fixtures::{SAMPLE_STORE, settings_toml};
use test_helpers::text::unquote;

use crate::fixtures::SettingsContext;

#[given("a settings file binding the sample store to locale {locale}")]
fn settings_file(settings: &SettingsContext, locale: String) {
    settings.file_locale.set(unquote(&locale).to_owned());
}

#[given("the environment variable {name} is {value}")]
fn environment_variable(settings: &SettingsContext, name: String, value: String) {
    let mut vars = settings.env.take().unwrap_or_default();
    vars.push((name.trim().to_owned(), unquote(&value).to_owned()));
    settings.env.set(vars);
}

#[when("the resolver is built from settings")]
fn build_from_settings(settings: &SettingsContext) -> Result<()> {
    let locale = settings
        .file_locale
        .take()
        .ok_or_else(|| anyhow!("settings file locale not configured"))?;
    let vars = settings.env.take().unwrap_or_default();
    let outcome = with_jail(|jail| {
        let store = write_store(jail, "translations.json", SAMPLE_STORE)?;
        jail.create_file("resolver.toml", &settings_toml(store.as_str(), &locale))?;
        for (name, value) in &vars {
            jail.set_env(name, value);
        }
        let built = ResolverSettings::load(Some(Utf8Path::new("resolver.toml")))
            .and_then(ResolverSettings::into_resolver)
            .map(|resolver| resolver.locale().to_owned())
            .map_err(|err| err.to_string());
        Ok(built)
    })?;
    settings.outcome.set(outcome);
    Ok(())
}

#[then("the resolver locale is {expected}")]
fn resolver_locale(settings: &SettingsContext, expected: String) -> Result<()> {
    let outcome = settings
        .outcome
        .take()
        .ok_or_else(|| anyhow!("expected a build outcome"))?;
    let locale = outcome.map_err(|err| anyhow!(err))?;
    let want = unquote(&expected);
    ensure!(locale == want, "resolver locale {locale:?}; expected {want:?}");
    Ok(())
}

#[then("building fails mentioning {fragment}")]
fn building_fails(settings: &SettingsContext, fragment: String) -> Result<()> {
    let outcome = settings
        .outcome
        .take()
        .ok_or_else(|| anyhow!("expected a build outcome"))?;
    let Err(message) = outcome else {
        return Err(anyhow!("resolver unexpectedly built"));
    };
    let want = unquote(&fragment);
    ensure!(message.contains(want), "error {message:?} does not mention {want:?}");
    Ok(())
}
