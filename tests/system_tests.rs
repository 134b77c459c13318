use peakshift::Settings;
use peakshift::system::{
    CommandOutput, CommandRunner, NoopRegistry, PrerequisiteFailure, RegCommand, RegistryAccess,
    SystemError, check_prerequisites, enforce,
};
use std::cell::RefCell;
use std::path::{Path, PathBuf};

/// Records every invocation and answers with a fixed exit status.
struct FakeRunner {
    success: bool,
    calls: RefCell<Vec<Vec<String>>>,
}

impl FakeRunner {
    fn new(success: bool) -> Self {
        Self {
            success,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl CommandRunner for &FakeRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, SystemError> {
        let mut call = vec![program.to_string()];
        call.extend(args.iter().map(|a| a.to_string()));
        self.calls.borrow_mut().push(call);
        Ok(CommandOutput {
            success: self.success,
            status: Some(if self.success { 0 } else { 1 }),
            stdout: String::new(),
            stderr: if self.success {
                String::new()
            } else {
                "ERROR: The system was unable to find the specified registry key or value."
                    .to_string()
            },
        })
    }
}

fn settings() -> Settings {
    Settings::from_yaml_str(
        "weekend: [0, 6]\nstartHour: 9\nstartMinute: 0\nendHour: 17\nendMinute: 0\nminCharge: 50\n",
    )
    .unwrap()
}

#[test]
fn reg_command_builds_export_and_import_calls() {
    let runner = FakeRunner::new(true);
    let reg = RegCommand::with_runner(&runner);
    reg.export_key("HKEY_LOCAL_MACHINE\\SOFTWARE\\Test", Path::new("backup.reg"))
        .unwrap();
    reg.import_file(Path::new("peakshift.reg")).unwrap();

    let calls = runner.calls.borrow();
    assert_eq!(
        calls[0],
        ["reg", "export", "HKEY_LOCAL_MACHINE\\SOFTWARE\\Test", "backup.reg", "/y"]
    );
    assert_eq!(calls[1], ["reg", "import", "peakshift.reg"]);
}

#[test]
fn reg_command_reports_failed_exit_status() {
    let runner = FakeRunner::new(false);
    let reg = RegCommand::with_runner(&runner);
    let err = reg.import_file(Path::new("peakshift.reg")).unwrap_err();
    match err {
        SystemError::CommandFailed { command, status, stderr } => {
            assert_eq!(command, "reg import peakshift.reg");
            assert_eq!(status, Some(1));
            assert!(stderr.contains("unable to find"));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn reg_query_status_decides_key_presence() {
    let present = FakeRunner::new(true);
    assert!(RegCommand::with_runner(&present).key_exists("HKCU\\A").unwrap());
    assert_eq!(present.calls.borrow()[0], ["reg", "query", "HKCU\\A"]);

    let absent = FakeRunner::new(false);
    assert!(!RegCommand::with_runner(&absent).key_exists("HKCU\\A").unwrap());
}

#[test]
fn noop_registry_refuses_export_and_import() {
    let reg = NoopRegistry;
    assert!(!reg.key_exists("HKCU\\A").unwrap());
    assert!(matches!(
        reg.export_key("HKCU\\A", Path::new("out.reg")),
        Err(SystemError::Unsupported(_))
    ));
    assert!(matches!(
        reg.import_file(Path::new("in.reg")),
        Err(SystemError::Unsupported(_))
    ));
}

#[test]
fn prerequisites_report_missing_application_and_key() {
    let mut settings = settings();
    settings.eco_utility_path = Some(PathBuf::from("/nonexistent/TEcoUtil.exe"));
    let failures = check_prerequisites(&settings, &NoopRegistry);
    assert_eq!(failures.len(), 2);
    assert!(matches!(failures[0], PrerequisiteFailure::ApplicationMissing(_)));
    assert!(matches!(failures[1], PrerequisiteFailure::RegistryKeyMissing(_)));
}

#[test]
fn prerequisites_pass_when_key_exists() {
    let runner = FakeRunner::new(true);
    let failures = check_prerequisites(&settings(), &RegCommand::with_runner(&runner));
    assert!(failures.is_empty());
    assert!(enforce(failures, false).is_ok());
}

#[test]
fn enforce_aborts_unless_continue_is_allowed() {
    let failures = vec![PrerequisiteFailure::RegistryKeyMissing("HKCU\\A".into())];
    assert!(enforce(failures.clone(), true).is_ok());

    let err = enforce(failures, false).unwrap_err();
    assert_eq!(err.failures.len(), 1);
    assert!(err.to_string().contains("registry key HKCU\\A not found"));
}
