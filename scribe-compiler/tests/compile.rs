//! End-to-end tests for the async compile entry points.

use std::fs;

use cscribe_compiler::{
    Compiler, CompilerOptions, DirectoryLocator, Error, LanguageVersion, Module,
};
use cscribe_syntax::{
    generators::{ConstructorBuilder, Field, MethodBuilder, Property},
    tree::{Modifier, Parameter},
    type_builder::{ClassBuilder, StructBuilder},
};
use tempfile::TempDir;

#[tokio::test]
async fn test_generated_class_compiles() {
    let unit = ClassBuilder::new("TestClass", "test").build();

    let result = Compiler::new().compile_units_in_memory(&[unit]).await.unwrap();

    assert!(result.success());
    assert!(result.diagnostics().is_empty());
    assert_eq!(result.output_path(), "");
}

#[tokio::test]
async fn test_generated_class_with_members_compiles() {
    let order = ClassBuilder::new("Order", "Shop")
        .with_usings(["System"])
        .with_fields([
            Field::new("_id", "int").modifiers([Modifier::Private, Modifier::Readonly]),
            Field::new("class", "string"),
        ])
        .with_constructors([ConstructorBuilder::new("Order")
            .with_parameters([Parameter::new("id", "int")])
            .with_body_lines(["_id = id;"])
            .build()])
        .with_properties([Property::auto("Name", "string")])
        .with_methods([MethodBuilder::new("Describe")
            .with_return_type("string")
            .with_expression_body("$\"Order {_id}: {Name}\"")
            .build()])
        .build();
    let point = StructBuilder::new("Point", "Shop")
        .with_primary_constructor([Parameter::new("X", "int"), Parameter::new("Y", "int")])
        .build();

    let result = Compiler::new()
        .compile_units_in_memory(&[order, point])
        .await
        .unwrap();

    assert!(result.success(), "{:?}", result.diagnostics());
    assert!(result.diagnostics().is_empty());
}

#[tokio::test]
async fn test_warnings_are_filtered() {
    let source = r#"
namespace test
{
    public class TestClass
    {
        public void Run()
        {
            int unused;
        }
    }
}
"#;
    let result = Compiler::new().compile_source_in_memory([source]).await.unwrap();

    assert!(result.success());
    assert!(result.diagnostics().is_empty());
}

#[tokio::test]
async fn test_errors_are_reported_as_rows() {
    let source = "namespace test\n{\n    public class TestClass\n    {\n        int x\n    }\n}\n";
    let result = Compiler::new().compile_source_in_memory([source]).await.unwrap();

    assert!(!result.success());
    let rows = result.diagnostics();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].code, "CS1002");
    assert_eq!(rows[0].severity, "Error");
    assert_eq!(rows[0].description, "; expected");
    let location = rows[0].location.unwrap();
    assert_eq!((location.line, location.column), (5, 14));
}

#[tokio::test]
async fn test_unterminated_accessor_fails() {
    let source = "public class Account\n{\n    public int Id { get; set }\n}\n";
    let result = Compiler::new().compile_source_in_memory([source]).await.unwrap();

    assert!(!result.success());
    let codes: Vec<&str> = result.diagnostics().iter().map(|r| r.code.as_str()).collect();
    assert_eq!(codes, vec!["CS1002"]);
}

#[tokio::test]
async fn test_empty_sources_rejected() {
    let err = Compiler::new()
        .compile_source_in_memory(Vec::<String>::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::EmptyInput { parameter: "sources" }));

    let err = Compiler::new()
        .compile_files_in_memory(Vec::<&str>::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::EmptyInput { parameter: "paths" }));
}

#[tokio::test]
async fn test_unreadable_file_is_io_error() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("Missing.cs");

    let err = Compiler::new()
        .compile_files_in_memory([&missing])
        .await
        .unwrap_err();

    match err {
        Error::Io { path, .. } => assert_eq!(path, missing),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_compile_files_to_disk() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("TestClass.cs");
    fs::write(&source, "namespace test { public class TestClass { public int Id { get; set; } } }")
        .unwrap();
    let output = temp.path().join("Test.dll");

    let result = Compiler::new().compile_files(&output, [&source]).await.unwrap();

    assert!(result.success());
    assert_eq!(result.output_path(), output.display().to_string());
    let module = Module::load(&output).unwrap();
    assert_eq!(module.name, "Test");
    let class = module.find_type("test.TestClass").unwrap();
    assert_eq!(class.members[0].name, "Id");
}

#[tokio::test]
async fn test_failed_compile_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("Broken.dll");

    let result = Compiler::new()
        .compile_source(Some(output.as_path()), ["namespace test { public class TestClass {"])
        .await
        .unwrap();

    assert!(!result.success());
    assert_eq!(result.diagnostics()[0].code, "CS1513");
    assert!(!output.exists());
}

#[tokio::test]
async fn test_duplicate_types_across_fragments() {
    let result = Compiler::new()
        .compile_source_in_memory([
            "namespace test { public class TestClass; }",
            "namespace test { public class TestClass; }",
        ])
        .await
        .unwrap();

    assert!(!result.success());
    assert_eq!(result.diagnostics().len(), 1);
    assert_eq!(
        result.diagnostics()[0].description,
        "The namespace 'test' already contains a definition for 'TestClass'"
    );
    assert_eq!(result.diagnostics()[0].location.unwrap().source, 1);
}

#[tokio::test]
async fn test_pinned_language_version() {
    let unit = ClassBuilder::new("Person", "test")
        .with_primary_constructor([Parameter::new("name", "string")])
        .build();
    let options = CompilerOptions::default().with_language_version(LanguageVersion::CSharp11);

    let result = Compiler::with_options(options)
        .compile_units_in_memory(&[unit])
        .await
        .unwrap();

    assert!(!result.success());
    assert!(result.diagnostics().iter().all(|row| row.code == "CS8370"));
}

#[tokio::test]
async fn test_missing_explicit_reference() {
    let result = Compiler::with_references(["/nonexistent/Vendor.Widgets.dll"])
        .compile_source_in_memory(["class A { }"])
        .await
        .unwrap();

    assert!(!result.success());
    assert_eq!(result.diagnostics()[0].code, "CS0006");
}

#[tokio::test]
async fn test_directory_locator_references() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("System.Private.CoreLib.dll"), b"").unwrap();
    fs::write(temp.path().join("System.Linq.dll"), b"").unwrap();
    let output = temp.path().join("Out.dll");

    let result = Compiler::new()
        .with_locator(DirectoryLocator::new(temp.path()))
        .compile_source(Some(output.as_path()), ["class A { }"])
        .await
        .unwrap();

    assert!(result.success());
    let module = Module::load(&output).unwrap();
    assert_eq!(module.references.len(), 2);
    assert!(module.references[0].ends_with("System.Private.CoreLib.dll"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_compiles_are_independent() {
    let compiler = Compiler::new();
    let mut handles = Vec::new();
    for i in 0..8 {
        let compiler = compiler.clone();
        let source = if i % 2 == 0 {
            format!("namespace n{i} {{ public class C{i}; }}")
        } else {
            format!("namespace n{i} {{ public class C{i} {{ int x }} }}")
        };
        handles.push(tokio::spawn(async move {
            compiler.compile_source_in_memory([source]).await
        }));
    }

    for (i, handle) in handles.into_iter().enumerate() {
        let result = handle.await.unwrap().unwrap();
        assert_eq!(result.success(), i % 2 == 0, "compile {i}");
    }
}
