use super::{Column, Comma, Delimited, Formatter, Ident, Params, Period, ToSql};

use vdir_core::{
    schema::{FieldType, SourceConfig},
    stmt::{Delete, FieldRef, Insert, JoinType, Select, Statement, TableRef, Update, Value},
    Filter,
};

/// A bound value, written as its placeholder.
struct Bind<'a>(&'a Value, Option<FieldType>);

/// A table name with an optional alias.
struct Table<'a> {
    config: Option<&'a SourceConfig>,
    name: &'a str,
    alias: Option<&'a str>,
}

/// `lhs = rhs`, used for SET lists and join conditions.
struct Equals<L, R>(L, R);

impl ToSql for &Statement {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Statement::Insert(stmt) => stmt.to_sql(f),
            Statement::Update(stmt) => stmt.to_sql(f),
            Statement::Delete(stmt) => stmt.to_sql(f),
            Statement::Select(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &Insert {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let table = Table::new(f, &self.source, None);

        if self.assignments.is_empty() {
            if f.serializer.is_mysql() {
                fmt!(f, "INSERT INTO " table " () VALUES ()");
            } else {
                fmt!(f, "INSERT INTO " table " DEFAULT VALUES");
            }
            return;
        }

        let columns: Vec<_> = self
            .assignments
            .iter()
            .map(|assignment| f.column(&assignment.field))
            .collect();

        let binds = self
            .assignments
            .iter()
            .zip(&columns)
            .map(|(assignment, column)| Bind(&assignment.value, column.ty()));

        fmt!(f, "INSERT INTO " table " (" Comma(&columns) ") VALUES (" Comma(binds) ")");
    }
}

impl ToSql for &Update {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let table = Table::new(f, &self.source, None);

        let assignments: Vec<_> = self
            .assignments
            .iter()
            .map(|assignment| {
                let column = f.column(&assignment.field);
                let ty = column.ty();
                Equals(column, Bind(&assignment.value, ty))
            })
            .collect();

        fmt!(f, "UPDATE " table " SET " Comma(assignments));
        where_clause(f, self.filter.as_ref(), &[]);
    }
}

impl ToSql for &Delete {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let table = Table::new(f, &self.source, None);

        fmt!(f, "DELETE FROM " table);
        where_clause(f, self.filter.as_ref(), &[]);
    }
}

impl ToSql for &Select {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let fields: Vec<_> = self.fields.iter().map(|field| resolve(f, field)).collect();

        fmt!(f, "SELECT ");
        if self.distinct {
            fmt!(f, "DISTINCT ");
        }
        fmt!(f, Comma(&fields) " FROM ");

        for (index, table) in self.tables.iter().enumerate() {
            table_ref(f, table, index);
        }

        where_clause(f, self.filter.as_ref(), &self.sql_filters);

        if !self.order_by.is_empty() {
            let order_by: Vec<_> = self.order_by.iter().map(|field| resolve(f, field)).collect();
            fmt!(f, " ORDER BY " Comma(&order_by));
        }
    }
}

fn table_ref<P: Params>(f: &mut Formatter<'_, P>, table: &TableRef, index: usize) {
    let name = Table::new(f, &table.source, Some(&table.alias));

    match &table.join {
        None if index == 0 => fmt!(f, name),
        None => fmt!(f, ", " name),
        Some(join) => {
            let keyword = match join.ty {
                JoinType::Inner => " JOIN ",
                JoinType::Left => " LEFT JOIN ",
            };

            let on: Vec<_> = join
                .on
                .iter()
                .map(|(lhs, rhs)| Equals(resolve(f, lhs), resolve(f, rhs)))
                .collect();

            fmt!(f, keyword name);
            if !on.is_empty() {
                fmt!(f, " ON " Delimited(on, " AND "));
            }
        }
    }
}

/// Writes ` WHERE ...` when the filter or any raw predicate is non-empty.
fn where_clause<P: Params>(f: &mut Formatter<'_, P>, filter: Option<&Filter>, sql_filters: &[String]) {
    let mut predicates = vec![];

    if let Some(filter) = filter {
        let predicate = f.nested(|f| filter.to_sql(f));
        if !predicate.is_empty() {
            predicates.push(predicate);
        }
    }

    for sql in sql_filters {
        predicates.push(format!("({sql})"));
    }

    if !predicates.is_empty() {
        fmt!(f, " WHERE " Delimited(&predicates, " AND "));
    }
}

fn resolve<'b, P: Params>(f: &Formatter<'b, P>, field: &'b FieldRef) -> Column<'b> {
    f.resolve(Some(&field.alias), &field.field)
}

impl<'a> Table<'a> {
    fn new<P: Params>(f: &Formatter<'a, P>, source: &'a str, alias: Option<&'a str>) -> Table<'a> {
        let config = f.serializer.source(source);
        let name = config
            .and_then(|config| config.table_name().last())
            .unwrap_or(source);

        Table {
            config,
            name,
            // The alias is only written when it differs from the table name
            alias: alias.filter(|alias| *alias != name),
        }
    }
}

impl ToSql for Table<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self.config {
            Some(config) => fmt!(f, Period(config.table_name().map(Ident))),
            None => fmt!(f, Ident(self.name)),
        }

        if let Some(alias) = self.alias {
            fmt!(f, " " Ident(alias));
        }
    }
}

impl ToSql for &Column<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        if let Some(alias) = self.alias {
            fmt!(f, Ident(alias) ".");
        }
        fmt!(f, Ident(self.name));
    }
}

impl ToSql for Column<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        (&self).to_sql(f);
    }
}

impl Column<'_> {
    fn ty(&self) -> Option<FieldType> {
        self.config.map(|config| config.ty)
    }
}

impl ToSql for Bind<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let placeholder = f.params.push(self.0, self.1);
        placeholder.to_sql(f);
    }
}

impl<L: ToSql, R: ToSql> ToSql for Equals<L, R> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, self.0 " = " self.1);
    }
}
