use wabi_codec::{encode_module, Encoder, EncoderConfig, UnsupportedSections};
use wabi_nodes::{FuncIdx, Module, NameMap, NameSection, Type, ValType};
use wasmparser::{Parser, Payload};

fn sample_module() -> Module {
    let mut function_names = NameMap::new();
    function_names.append(0, "main");

    let mut module = Module::new();
    module
        .custom_sections
        .insert("wabi.build".into(), Box::new([0x00]));
    module
        .custom_sections
        .insert("wabi.meta".into(), b"hello".to_vec().into_boxed_slice());
    module.type_section = vec![
        Type::default(),
        Type::new([ValType::I32], []),
        Type::new([], [ValType::F64]),
        Type::new([ValType::I32, ValType::I64, ValType::F32], [ValType::I32]),
    ];
    module.name_section = Some(NameSection {
        module_name: Some("sample".into()),
        function_names,
        ..Default::default()
    });
    module
}

/// Summarize the sections of a binary as wasmparser sees them.
fn sections(bytes: &[u8]) -> anyhow::Result<Vec<String>> {
    let mut out = vec![];
    for payload in Parser::new(0).parse_all(bytes) {
        match payload? {
            Payload::Version { num, .. } => out.push(format!("version {num}")),
            Payload::CustomSection(reader) => out.push(format!("custom {}", reader.name())),
            Payload::TypeSection(reader) => out.push(format!("types {}", reader.count())),
            Payload::End(_) => out.push("end".to_string()),
            _ => anyhow::bail!("unexpected payload"),
        }
    }
    Ok(out)
}

#[test]
fn encoded_module_validates() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let bytes = encode_module(&sample_module())?;
    wasmparser::validate(&bytes)?;

    assert_eq!(
        sections(&bytes)?,
        [
            "version 1",
            "custom wabi.build",
            "custom wabi.meta",
            "types 4",
            "custom name",
            "end",
        ]
    );
    Ok(())
}

#[test]
fn name_only_module_validates() -> anyhow::Result<()> {
    let module = Module {
        name_section: Some(NameSection {
            module_name: Some("only".into()),
            ..Default::default()
        }),
        ..Default::default()
    };

    let bytes = encode_module(&module)?;
    wasmparser::validate(&bytes)?;
    assert_eq!(sections(&bytes)?, ["version 1", "custom name", "end"]);
    Ok(())
}

#[test]
fn omitted_sections_still_validate() -> anyhow::Result<()> {
    let mut module = sample_module();
    module.start_section = Some(FuncIdx(0));

    assert!(encode_module(&module).is_err());

    let encoder = Encoder::new(EncoderConfig::new().unsupported_sections(UnsupportedSections::Omit));
    let bytes = encoder.encode(&module)?;
    wasmparser::validate(&bytes)?;
    assert_eq!(bytes, encode_module(&sample_module())?);
    Ok(())
}
