use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use layerforge::config::WorkspaceConfig;
use layerforge::emit::{run_generation, GenerationContext, GenerationScope};
use layerforge::merge::{CUSTOM_CODE_BEGIN, CUSTOM_CODE_END};

const METADATA: &str = r#"{
  "module": "Acme.Domain",
  "types": [
    {
      "name": "Customer",
      "namespace": "Acme.Domain.Entities.Sales",
      "members": [
        { "name": "Id", "shape": "int" },
        { "name": "Name", "shape": "string" },
        { "name": "Orders", "shape": "list<Order>", "nullable": true }
      ]
    },
    {
      "name": "Order",
      "namespace": "Acme.Domain.Entities.Sales",
      "members": [
        { "name": "Id", "shape": "int" },
        { "name": "Total", "shape": "decimal" }
      ]
    }
  ],
  "enums": [
    { "name": "OrderState", "namespace": "Acme.Domain.Entities.Sales", "values": ["Open", "Closed"] }
  ]
}"#;

fn temp_solution(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("pass_{tag}_{}_{nanos}", std::process::id()));
    fs::create_dir_all(dir.join("build/out")).unwrap();
    fs::write(dir.join("build/out/module.metadata.json"), METADATA).unwrap();
    dir
}

fn context_for(root: &PathBuf) -> GenerationContext {
    let config = WorkspaceConfig::resolve(None, root).unwrap();
    GenerationContext::initialize(config)
}

fn read_all_outputs(root: &PathBuf) -> Vec<(PathBuf, String)> {
    let mut out = Vec::new();
    let mut stack = vec![root.clone()];
    while let Some(dir) = stack.pop() {
        for entry in fs::read_dir(&dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                if path.file_name().map(|n| n == "build").unwrap_or(false) {
                    continue;
                }
                stack.push(path);
            } else {
                out.push((path.clone(), fs::read_to_string(&path).unwrap()));
            }
        }
    }
    out.sort_by(|a, b| a.0.cmp(&b.0));
    out
}

#[test]
fn test_full_pass_writes_every_layer() {
    let root = temp_solution("full");
    let ctx = context_for(&root);
    let summary = run_generation(&ctx, &GenerationScope::all(), false, false).unwrap();
    assert!(summary.skipped.is_empty());

    for expected in [
        "Server/Logic/Models/Sales/Customer.cs",
        "Server/Logic/Models/Sales/CustomersAccess.cs",
        "Server/Api/Models/Sales/CustomerModel.cs",
        "Server/Api/Models/Sales/Customer.cs",
        "Server/Api/Models/Sales/CustomerEditModel.cs",
        "Server/Api/Models/Sales/CustomersController.cs",
        "Server/Site/Models/Sales/CustomerView.cshtml",
        "Clients/App/src/models/sales/customer.model.ts",
        "Clients/App/src/models/sales/customer.contract.ts",
        "Clients/App/src/models/sales/customers.service.ts",
        "Clients/App/src/models/sales/order-state.enum.ts",
        "Clients/Script/src/models/sales/customer.model.ts",
        "Shell/Facades/Sales/CustomersFacade.cs",
        "Shell/FacadeRegistry.cs",
    ] {
        assert!(root.join(expected).exists(), "missing {expected}");
    }
    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn test_two_passes_are_byte_identical() {
    let root = temp_solution("determinism");
    let ctx = context_for(&root);
    run_generation(&ctx, &GenerationScope::all(), false, false).unwrap();
    let first = read_all_outputs(&root);

    // A fresh context over the same snapshot regenerates everything; the
    // merge step folds the (empty) custom regions back in.
    let ctx = context_for(&root);
    run_generation(&ctx, &GenerationScope::all(), true, false).unwrap();
    let second = read_all_outputs(&root);

    assert_eq!(first.len(), second.len());
    for ((path_a, content_a), (path_b, content_b)) in first.iter().zip(second.iter()) {
        assert_eq!(path_a, path_b);
        assert_eq!(content_a, content_b, "{path_a:?} changed between passes");
    }
    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn test_custom_region_survives_regeneration() {
    let root = temp_solution("merge");
    let ctx = context_for(&root);
    run_generation(&ctx, &GenerationScope::all(), false, false).unwrap();

    let model = root.join("Server/Logic/Models/Sales/Customer.cs");
    let content = fs::read_to_string(&model).unwrap();
    let edited = content.replace(
        &format!("{CUSTOM_CODE_BEGIN}\n{CUSTOM_CODE_END}"),
        &format!("{CUSTOM_CODE_BEGIN}\n    public int HandWritten;\n{CUSTOM_CODE_END}"),
    );
    assert_ne!(content, edited, "fixture expects an empty code region");
    fs::write(&model, &edited).unwrap();

    let ctx = context_for(&root);
    run_generation(&ctx, &GenerationScope::all(), false, false).unwrap();
    let regenerated = fs::read_to_string(&model).unwrap();
    assert_eq!(
        regenerated.matches("public int HandWritten;").count(),
        1,
        "hand-written line must reappear exactly once"
    );
    assert_eq!(regenerated, edited, "merge with no other changes is byte-identical");
    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn test_stub_is_user_owned() {
    let root = temp_solution("stub");
    let ctx = context_for(&root);
    run_generation(&ctx, &GenerationScope::all(), false, false).unwrap();

    let stub = root.join("Server/Api/Models/Sales/Customer.cs");
    fs::write(&stub, "// taken over by hand\n").unwrap();

    let ctx = context_for(&root);
    let summary = run_generation(&ctx, &GenerationScope::all(), false, false).unwrap();
    assert!(summary.skipped.contains(&stub));
    assert_eq!(fs::read_to_string(&stub).unwrap(), "// taken over by hand\n");

    // --force reclaims the stub; the marker-less content is backed up.
    let ctx = context_for(&root);
    run_generation(&ctx, &GenerationScope::all(), true, false).unwrap();
    let content = fs::read_to_string(&stub).unwrap();
    assert!(content.contains("public partial class Customer : CustomerModel"));
    let backup = root.join("Server/Api/Models/Sales/Customer.cs.custom.bak");
    assert_eq!(fs::read_to_string(backup).unwrap(), "// taken over by hand\n");
    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn test_dry_run_touches_nothing() {
    let root = temp_solution("dry");
    let ctx = context_for(&root);
    let summary = run_generation(&ctx, &GenerationScope::all(), false, true).unwrap();
    assert!(!summary.written.is_empty());
    assert!(!root.join("Server").exists());
    assert!(!root.join("Shell").exists());
    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn test_scope_limits_layers() {
    let root = temp_solution("scope");
    let ctx = context_for(&root);
    let mut scope = GenerationScope::none();
    scope.logic = true;
    run_generation(&ctx, &scope, false, false).unwrap();
    assert!(root.join("Server/Logic/Models/Sales/Customer.cs").exists());
    assert!(!root.join("Server/Api").exists());
    assert!(!root.join("Clients").exists());
    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn test_missing_metadata_is_a_quiet_empty_pass() {
    let root = std::env::temp_dir().join(format!(
        "pass_empty_{}_{}",
        std::process::id(),
        SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos()
    ));
    fs::create_dir_all(&root).unwrap();
    let ctx = context_for(&root);
    let summary = run_generation(&ctx, &GenerationScope::all(), false, false).unwrap();
    assert!(summary.written.is_empty());
    assert!(summary.skipped.is_empty());
    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn test_settings_file_steers_the_pass() {
    let root = temp_solution("settings");
    fs::write(
        root.join("layerforge.settings"),
        "unit;item;itemName;setting;value\nLogic;ModelProperty;Customer.Orders;Generate;False\nSite;Type;Customer;Generate;False\n",
    )
    .unwrap();
    let ctx = context_for(&root);
    run_generation(&ctx, &GenerationScope::all(), false, false).unwrap();

    let logic_model =
        fs::read_to_string(root.join("Server/Logic/Models/Sales/Customer.cs")).unwrap();
    assert!(logic_model.contains("public string Name"));
    assert!(!logic_model.contains("Orders"));

    // The Site toggle removes the whole type from that layer only.
    assert!(!root.join("Server/Site/Models/Sales/Customer.cs").exists());
    assert!(root.join("Server/Site/Models/Sales/Order.cs").exists());
    assert!(root.join("Server/Api/Models/Sales/CustomerModel.cs").exists());
    fs::remove_dir_all(&root).unwrap();
}
