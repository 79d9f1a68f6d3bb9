use crate::categorize::CategorizedDecls;
use reorder_syntax::{Decl, Spec};

/// Order every sortable bucket by name.
///
/// Comparison is byte-wise and the sort is stable, so equal names keep source order.
/// `init` and `uncategorized` are left as they are.
pub fn sort_categorized(cat: &mut CategorizedDecls) {
    sort_specs(&mut cat.exported_consts);
    sort_specs(&mut cat.unexported_consts);
    sort_specs(&mut cat.exported_vars);
    sort_specs(&mut cat.unexported_vars);

    for enums in [&mut cat.exported_enums, &mut cat.unexported_enums] {
        enums.sort_by(|a, b| a.name.cmp(&b.name));
        for group in enums.iter_mut() {
            sort_decls(&mut group.exported_methods);
            sort_decls(&mut group.unexported_methods);
        }
    }

    for types in [&mut cat.exported_types, &mut cat.unexported_types] {
        types.sort_by(|a, b| a.name.cmp(&b.name));
        for group in types.iter_mut() {
            sort_decls(&mut group.constructors);
            sort_decls(&mut group.exported_methods);
            sort_decls(&mut group.unexported_methods);
        }
    }

    sort_decls(&mut cat.exported_funcs);
    sort_decls(&mut cat.unexported_funcs);
}

fn sort_specs(specs: &mut [Spec]) {
    specs.sort_by(|a, b| a.name().cmp(b.name()));
}

fn sort_decls(decls: &mut [Decl]) {
    decls.sort_by(|a, b| a.name().cmp(b.name()));
}
