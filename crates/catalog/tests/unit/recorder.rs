//! # Recording Engine Tests
//!
//! Tests for operation bookkeeping, handle checks, and the required-port check the
//! recording engine performs at run time.

use uarch_catalog::EngineError;
use uarch_catalog::common::ByteSize;
use uarch_catalog::engine::{Assignment, ComponentHandle, Engine, EngineOp, ParamValue};
use uarch_catalog::{ProfileCatalog, RecordingEngine};

#[test]
fn test_handles_are_sequential() {
    let mut engine = RecordingEngine::new();
    let a = engine.create_component("System", Vec::new()).unwrap();
    let b = engine.create_component("SystemXBar", Vec::new()).unwrap();
    assert_eq!(a, ComponentHandle(0));
    assert_eq!(b, ComponentHandle(1));
    assert_eq!(engine.kind_of(b), Some("SystemXBar"));
    assert_eq!(engine.kind_of(ComponentHandle(2)), None);
}

#[test]
fn test_connect_unknown_handle_rejected() {
    let mut engine = RecordingEngine::new();
    let bus = engine.create_component("SystemXBar", Vec::new()).unwrap();
    let ghost = ComponentHandle(7);
    let err = engine
        .connect(ghost.port("port"), bus.port("mem_side_ports"))
        .unwrap_err();
    assert_eq!(err, EngineError::UnknownComponent(ghost));
    assert_eq!(engine.ops().len(), 1);
    assert!(!engine.is_connected(bus.port("mem_side_ports")));
}

#[test]
fn test_parameter_referencing_unknown_handle_rejected() {
    let mut engine = RecordingEngine::new();
    let err = engine
        .create_component(
            "MinorFUPool",
            vec![Assignment::new(
                "FUList",
                ParamValue::List(vec![ParamValue::Component(ComponentHandle(3))]),
            )],
        )
        .unwrap_err();
    assert_eq!(err, EngineError::UnknownComponent(ComponentHandle(3)));
    assert!(engine.ops().is_empty());

    let err = engine
        .set_global_param("system.cpu", ComponentHandle(0).into())
        .unwrap_err();
    assert_eq!(err, EngineError::UnknownComponent(ComponentHandle(0)));
}

#[test]
fn test_run_reports_first_unconnected_port() {
    let mut engine = RecordingEngine::new();
    let cache = engine
        .create_component("L2Cache", vec![Assignment::new("size", ByteSize::mib(1))])
        .unwrap();
    let bus = engine.create_component("L2XBar", Vec::new()).unwrap();
    engine
        .connect(cache.port("cpu_side"), bus.port("mem_side_ports"))
        .unwrap();

    let err = engine.run().unwrap_err();
    assert_eq!(
        err,
        EngineError::UnconnectedPort {
            component: "L2Cache#0".to_string(),
            port: "mem_side".to_string(),
        }
    );
    assert_eq!(
        err.to_string(),
        "unconnected port `mem_side` on component L2Cache#0"
    );
}

#[test]
fn test_run_ignores_portless_components() {
    let mut engine = RecordingEngine::new();
    let _ = engine.create_component("LocalBP", Vec::new()).unwrap();
    let _ = engine.create_component("DDR4_2400_8x8", Vec::new()).unwrap();
    let outcome = engine.run().unwrap();
    assert_eq!(outcome.final_tick, 0);
    assert!(!outcome.cause.is_empty());
}

#[test]
fn test_ops_recorded_in_issue_order() {
    let mut engine = RecordingEngine::new();
    let system = engine.create_component("System", Vec::new()).unwrap();
    engine
        .set_global_param("system.mem_mode", "timing".into())
        .unwrap();
    let bus = engine.create_component("SystemXBar", Vec::new()).unwrap();
    engine
        .connect(system.port("system_port"), bus.port("cpu_side_ports"))
        .unwrap();

    let ops = engine.ops();
    assert_eq!(ops.len(), 4);
    assert!(matches!(ops[0], EngineOp::Create { ref kind, .. } if kind == "System"));
    assert!(matches!(ops[1], EngineOp::SetGlobal { ref path, .. } if path == "system.mem_mode"));
    assert!(matches!(ops[3], EngineOp::Connect { .. }));
    assert_eq!(
        ops[3].to_string(),
        "connect #0.system_port <-> #1.cpu_side_ports"
    );
}

#[test]
fn test_plan_json() {
    let catalog = ProfileCatalog::builtin();
    let mut engine = RecordingEngine::new();
    let _ = catalog
        .apply(catalog.get_profile("Shakti-C").unwrap(), &mut engine)
        .unwrap();

    let json: serde_json::Value = serde_json::from_str(&engine.plan_json().unwrap()).unwrap();
    let ops = json.as_array().unwrap();
    assert_eq!(ops.len(), engine.ops().len());
    assert_eq!(ops[0]["op"], "create");
    assert_eq!(ops[0]["kind"], "System");
    assert_eq!(ops[1]["op"], "setGlobal");
    assert_eq!(ops[1]["path"], "system.clk_domain.clock");
    assert_eq!(ops[1]["value"]["frequency"], "1GHz");
    assert!(
        ops.iter()
            .any(|op| op["op"] == "connect" && op["b"]["name"] == "icache_port")
    );
}
