use distla_lowlevel::{
    native_entries, Arg, CallOptions, FlatArg, Lowlevel, Result, RoutineFamily, RoutineTable,
};
use distla_macros::lowlevel_routine;

/// Report the flat arity.
#[lowlevel_routine(name = "pdarity", family = "pblas")]
fn arity(args: &[FlatArg]) -> Result<i32> {
    Ok(args.len() as i32)
}

#[lowlevel_routine(name = "pzfail")]
fn always_fails(_args: &[FlatArg]) -> Result<i32> {
    Ok(-4)
}

mod inner {
    use super::*;

    #[lowlevel_routine(family = "redist")]
    pub fn pigemr2d(_args: &[FlatArg]) -> Result<i32> {
        Ok(0)
    }
}

#[test]
fn contains_registered_routines() {
    let names: Vec<&str> = native_entries().into_iter().map(|e| e.name).collect();
    assert!(names.contains(&"pdarity"));
    assert!(names.contains(&"pzfail"));
    assert!(names.contains(&"pigemr2d"));
}

#[test]
fn families_and_docs_are_recorded() {
    let table = RoutineTable::from_inventory();
    assert_eq!(table.get("pdarity").unwrap().family(), RoutineFamily::Pblas);
    assert_eq!(table.get("pzfail").unwrap().family(), RoutineFamily::Scalapack);
    assert_eq!(table.get("pigemr2d").unwrap().family(), RoutineFamily::Redist);
    assert_eq!(table.get("pdarity").unwrap().doc(), "Report the flat arity.");
}

#[test]
fn registered_routines_are_callable_through_wrappers() {
    let lowlevel = Lowlevel::with_options(RoutineTable::from_inventory(), CallOptions::expanded());
    let status = lowlevel
        .call("pdarity", vec![Arg::from("N"), Arg::from(3), Arg::from(2.0f64)])
        .unwrap();
    assert_eq!(status, 3);
    assert_eq!(lowlevel.wrapper("pzfail").unwrap().call(vec![]).unwrap(), -4);
    // the annotated function stays an ordinary function
    assert_eq!(arity(&[FlatArg::int(1)]).unwrap(), 1);
    assert_eq!(always_fails(&[]).unwrap(), -4);
}
