use mockall::mock;
use uarch_catalog::EngineError;
use uarch_catalog::engine::{
    Assignment, ComponentHandle, Engine, ParamValue, Port, RunOutcome,
};

mock! {
    pub SimEngine {}
    impl Engine for SimEngine {
        fn create_component(
            &mut self,
            kind: &str,
            params: Vec<Assignment>,
        ) -> Result<ComponentHandle, EngineError>;
        fn connect(&mut self, a: Port, b: Port) -> Result<(), EngineError>;
        fn set_global_param(&mut self, path: &str, value: ParamValue) -> Result<(), EngineError>;
        fn run(&mut self) -> Result<RunOutcome, EngineError>;
    }
}

impl MockSimEngine {
    /// A mock that accepts every operation and hands out sequential handles.
    pub fn permissive() -> Self {
        let mut engine = Self::new();
        let mut next = 0u32;
        engine.expect_create_component().returning(move |_, _| {
            let handle = ComponentHandle(next);
            next += 1;
            Ok(handle)
        });
        engine.expect_connect().returning(|_, _| Ok(()));
        engine.expect_set_global_param().returning(|_, _| Ok(()));
        engine
    }
}
