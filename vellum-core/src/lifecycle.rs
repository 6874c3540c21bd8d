//! Standard component lifecycle

use vellum_emit::{ComponentRegistration, EmitOp, Registration};

use crate::config::{ComponentConfig, PollingConfig, CONF_SETUP_PRIORITY, CONF_UPDATE_INTERVAL};
use crate::error::ValidationError;
use crate::ids::Id;
use crate::schema::{float_, Fields};
use crate::time::{update_interval, UpdateInterval};
use crate::traits::ComponentLifecycle;

/// Lifecycle of the host runtime's component registry
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardLifecycle;

impl ComponentLifecycle for StandardLifecycle {
    fn component_schema(&self, fields: &mut Fields<'_>) -> Result<ComponentConfig, ValidationError> {
        Ok(ComponentConfig {
            setup_priority: fields.optional(CONF_SETUP_PRIORITY, float_)?,
        })
    }

    fn polling_schema(
        &self,
        fields: &mut Fields<'_>,
        default_interval: UpdateInterval,
    ) -> Result<PollingConfig, ValidationError> {
        Ok(PollingConfig {
            update_interval: fields.optional_or(
                CONF_UPDATE_INTERVAL,
                default_interval,
                update_interval,
            )?,
        })
    }

    fn register_component(
        &self,
        id: &Id,
        component: &ComponentConfig,
        polling: Option<&PollingConfig>,
    ) -> EmitOp {
        EmitOp::Register {
            target: id.as_str().into(),
            registration: Registration::Component(ComponentRegistration {
                setup_priority: component.setup_priority,
                update_interval_ms: polling.map(|p| p.update_interval.as_runtime_millis()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigPath, ErrorKind};
    use crate::time::TimePeriod;
    use toml::value::Table;

    fn parse(s: &str) -> Table {
        toml::from_str(s).unwrap()
    }

    #[test]
    fn test_polling_default() {
        let raw = parse("");
        let mut fields = Fields::new(&raw, ConfigPath::root());
        let polling = StandardLifecycle
            .polling_schema(&mut fields, UpdateInterval::Every(TimePeriod::from_secs(5)))
            .unwrap();
        assert_eq!(polling.update_interval.as_runtime_millis(), 5_000);
    }

    #[test]
    fn test_polling_override_and_never() {
        let raw = parse("update_interval = \"250ms\"");
        let mut fields = Fields::new(&raw, ConfigPath::root());
        let polling = StandardLifecycle
            .polling_schema(&mut fields, UpdateInterval::Never)
            .unwrap();
        assert_eq!(polling.update_interval.as_runtime_millis(), 250);

        let raw = parse("update_interval = \"never\"");
        let mut fields = Fields::new(&raw, ConfigPath::root());
        let polling = StandardLifecycle
            .polling_schema(&mut fields, UpdateInterval::Every(TimePeriod::from_secs(1)))
            .unwrap();
        assert_eq!(polling.update_interval, UpdateInterval::Never);
    }

    #[test]
    fn test_polling_rejects_missing_unit() {
        let raw = parse("update_interval = 5");
        let mut fields = Fields::new(&raw, ConfigPath::root());
        let err = StandardLifecycle
            .polling_schema(&mut fields, UpdateInterval::Never)
            .unwrap_err();
        assert_eq!(err.path.to_string(), "update_interval");
        assert!(matches!(err.kind, ErrorKind::InvalidTimePeriod(_)));
    }

    #[test]
    fn test_register_component() {
        let id = Id::new("fb").unwrap();
        let op = StandardLifecycle.register_component(
            &id,
            &ComponentConfig {
                setup_priority: Some(800.0),
            },
            Some(&PollingConfig {
                update_interval: UpdateInterval::Never,
            }),
        );
        assert_eq!(
            op,
            EmitOp::Register {
                target: "fb".into(),
                registration: Registration::Component(ComponentRegistration {
                    setup_priority: Some(800.0),
                    update_interval_ms: Some(u32::MAX),
                }),
            }
        );
    }
}
