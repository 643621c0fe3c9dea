use super::*;

const ORBIT: &str = r#"
// spinning box with a custom material
constants shiny 0.3 0.8 0.2  0.3 0.8 0.2  0.1 0.4 0.9
frames 10
basename orbit
vary spin 0 9 0 1   # one full turn
push
move 250 250 0
rotate y 360 spin
box shiny -50 50 50 100 100 100
pop
line 0 0 0 499 499 0
save out.png
"#;

#[test]
fn parses_every_command_kind_in_order() {
    let script = Script::parse(ORBIT).unwrap();
    let ops: Vec<&str> = script.commands.iter().map(Command::op_name).collect();
    assert_eq!(
        ops,
        [
            "frames", "basename", "vary", "push", "move", "rotate", "box", "pop", "line", "save"
        ]
    );
    assert_eq!(
        script.commands[2],
        Command::Vary {
            knob: "spin".to_string(),
            start_frame: 0,
            end_frame: 9,
            start_value: 0.0,
            end_value: 1.0,
        }
    );
    assert_eq!(
        script.commands[5],
        Command::Rotate {
            axis: Axis::Y,
            degrees: 360.0,
            knob: Some("spin".to_string()),
        }
    );
    assert_eq!(
        script.commands[6],
        Command::Box {
            origin: [-50.0, 50.0, 50.0],
            dims: [100.0, 100.0, 100.0],
            constants: Some("shiny".to_string()),
        }
    );
}

#[test]
fn constants_populate_symbol_table() {
    let script = Script::parse(ORBIT).unwrap();
    let shiny = script.symbols.get("shiny").unwrap();
    assert_eq!(shiny.blue, Reflectance::new(0.1, 0.4, 0.9));
    assert!(script.symbols.get(crate::script::symbols::DEFAULT_MATERIAL).is_some());
}

#[test]
fn errors_carry_line_numbers() {
    let err = Script::parse("push\nmove 1 2\n").unwrap_err();
    match err {
        KeysceneError::Parse { line, msg } => {
            assert_eq!(line, 2);
            assert!(msg.starts_with("move:"), "{msg}");
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = Script::parse("\n\nteleport 1 2 3").unwrap_err();
    assert!(err.to_string().contains("line 3"));
    assert!(err.to_string().contains("unknown command 'teleport'"));
}

#[test]
fn rejects_malformed_arguments() {
    assert!(Script::parse("rotate w 90").is_err());
    assert!(Script::parse("move 1 2 3 4").is_err());
    assert!(Script::parse("frames -2").is_err());
    assert!(Script::parse("vary k 0 9 0").is_err());
    assert!(Script::parse("pop now").is_err());
}

#[test]
fn reads_json_command_list() {
    let json = r#"{
        "commands": [
            {"op": "frames", "count": 3},
            {"op": "move", "offset": [1, 0, 0], "knob": "k"},
            {"op": "sphere", "center": [0, 0, 0], "radius": 5, "constants": "matte"}
        ],
        "materials": {
            "matte": {
                "red": {"ambient": 0.1, "diffuse": 0.9, "specular": 0.0},
                "green": {"ambient": 0.1, "diffuse": 0.9, "specular": 0.0},
                "blue": {"ambient": 0.1, "diffuse": 0.9, "specular": 0.0}
            }
        }
    }"#;
    let script = Script::from_json_reader(json.as_bytes()).unwrap();
    assert_eq!(script.commands.len(), 3);
    assert_eq!(script.commands[1].knob(), Some("k"));
    assert!(script.symbols.get("matte").is_some());
}
